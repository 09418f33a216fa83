//! # Media Module
//!
//! Turns the loosely typed media fields of a product (`image` and `video`
//! are comma-separated lists of sources) into an ordered, typed sequence.
//!
//! ```text
//! image: "a.jpg, b.jpg,,c.jpg"     video: "intro.mp4"
//!          │                                 │
//!          ▼                                 ▼
//! [Image a.jpg, Image b.jpg, Image c.jpg, Video intro.mp4]
//! ```
//!
//! Parsing is total: blank entries are dropped, whitespace is trimmed and an
//! empty result simply means "no media".

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Kind of a media entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

/// A single image or video in a carousel sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub source: String,
}

impl MediaItem {
    /// Creates an image entry.
    pub fn image(source: impl Into<String>) -> Self {
        MediaItem {
            kind: MediaKind::Image,
            source: source.into(),
        }
    }

    /// Creates a video entry.
    pub fn video(source: impl Into<String>) -> Self {
        MediaItem {
            kind: MediaKind::Video,
            source: source.into(),
        }
    }

    #[inline]
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Parses a comma-separated source list into media items of one kind.
///
/// ## Example
/// ```rust
/// use storefront_core::media::{parse_media_list, MediaKind};
///
/// let items = parse_media_list(Some("a.jpg, b.jpg,,c.jpg"), MediaKind::Image);
/// let sources: Vec<&str> = items.iter().map(|m| m.source.as_str()).collect();
/// assert_eq!(sources, ["a.jpg", "b.jpg", "c.jpg"]);
///
/// assert!(parse_media_list(None, MediaKind::Video).is_empty());
/// ```
pub fn parse_media_list(raw: Option<&str>, kind: MediaKind) -> Vec<MediaItem> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|source| !source.is_empty())
            .map(|source| MediaItem {
                kind,
                source: source.to_string(),
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Builds the full carousel sequence: every image, then every video.
pub fn media_sequence(images: Option<&str>, videos: Option<&str>) -> Vec<MediaItem> {
    let mut items = parse_media_list(images, MediaKind::Image);
    items.extend(parse_media_list(videos, MediaKind::Video));
    items
}
