//! # Media Player
//!
//! The seam between the carousel and whatever actually renders video.
//!
//! The carousel only ever asks a slot to `play` or `pause`. `play` is
//! asynchronous and may be refused (autoplay policy, missing file); the
//! driver reports the outcome back to the state machine.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use storefront_core::{MediaSlot, PlaybackError, PlaybackRequest};
use tracing::{debug, info};

/// Boxed future returned by [`MediaPlayer::play`].
pub type PlaybackFuture<'a> = Pin<Box<dyn Future<Output = Result<(), PlaybackError>> + Send + 'a>>;

/// Controls the video elements of one carousel.
///
/// Videos are always started muted, looped and inline.
pub trait MediaPlayer: Send + Sync {
    /// Starts playback of `request.source` in `request.slot`.
    fn play<'a>(&'a self, request: &'a PlaybackRequest) -> PlaybackFuture<'a>;

    /// Pauses the video of `slot`. Never fails.
    fn pause(&self, slot: MediaSlot);
}

// =============================================================================
// Headless Player
// =============================================================================

/// Number of events [`HeadlessPlayer`] keeps.
pub const EVENT_LOG_CAPACITY: usize = 64;

/// Player without a screen: logs requests and records the most recent
/// [`EVENT_LOG_CAPACITY`] of them.
///
/// With `block_autoplay` set every play request is refused, the way browsers
/// refuse unmuted autoplay.
#[derive(Debug, Default)]
pub struct HeadlessPlayer {
    block_autoplay: bool,
    log: Mutex<VecDeque<PlayerEvent>>,
}

/// A request seen by [`HeadlessPlayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Played { slot: MediaSlot, source: String },
    Paused { slot: MediaSlot },
}

impl HeadlessPlayer {
    pub fn new() -> Self {
        HeadlessPlayer::default()
    }

    /// A player that refuses every play request.
    pub fn blocking_autoplay() -> Self {
        HeadlessPlayer {
            block_autoplay: true,
            log: Mutex::new(VecDeque::new()),
        }
    }

    /// Recent requests, oldest first.
    pub fn events(&self) -> Vec<PlayerEvent> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    fn record(&self, event: PlayerEvent) {
        let mut log = self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if log.len() == EVENT_LOG_CAPACITY {
            log.pop_front();
        }
        log.push_back(event);
    }
}

impl MediaPlayer for HeadlessPlayer {
    fn play<'a>(&'a self, request: &'a PlaybackRequest) -> PlaybackFuture<'a> {
        Box::pin(async move {
            self.record(PlayerEvent::Played {
                slot: request.slot,
                source: request.source.clone(),
            });

            if self.block_autoplay {
                info!(source = %request.source, "Autoplay blocked");
                return Err(PlaybackError::AutoplayBlocked(
                    "play() requires a user gesture".to_string(),
                ));
            }

            debug!(slot = ?request.slot, source = %request.source, "Playing video (muted, looped)");
            Ok(())
        })
    }

    fn pause(&self, slot: MediaSlot) {
        debug!(?slot, "Pausing video");
        self.record(PlayerEvent::Paused { slot });
    }
}
