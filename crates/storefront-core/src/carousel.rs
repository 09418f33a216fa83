//! # Media Carousel
//!
//! The state machine behind a product's image/video carousel: one item
//! visible at a time, automatic advancement, manual prev/next with a
//! cooldown, video playback and a maximized overlay.
//!
//! ## Effects, Not I/O
//! The carousel never sleeps and never touches a video element. Every call
//! returns the [`CarouselEffect`]s the caller must execute; timer firings and
//! playback results are fed back through [`MediaCarousel::handle_timer`] and
//! [`MediaCarousel::handle_playback`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Carousel State Machine                             │
//! │                                                                         │
//! │            advance / auto timer             transition timer            │
//! │  ┌──────────┐ ───────────────────► ┌──────────────────┐ ─────────┐      │
//! │  │ Idle(i)  │                      │ Transitioning    │          │      │
//! │  │          │ ◄─────────────────── │ (from i, to j)   │ ◄────────┘      │
//! │  └────┬─────┘     commit i = j     └──────────────────┘  navigation     │
//! │       │ navigate (manual)                                  ignored      │
//! │       ▼                                                                 │
//! │  ┌──────────┐   cooldown timer                                          │
//! │  │ Paused(i)│ ──────────────────► Idle(i) (auto-advance re-armed)       │
//! │  └──────────┘                                                           │
//! │                                                                         │
//! │  Auto-advance is armed only when: active, len > 1, not transitioning,   │
//! │  not paused, and the current item is not a video.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Video Slots
//! The inline view and the maximized overlay each own a video element,
//! addressed as [`MediaSlot::Inline`] and [`MediaSlot::Maximized`]. Only the
//! slot that is currently shown plays.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::PlaybackError;
use crate::media::{media_sequence, MediaItem, MediaKind};
use crate::timer::{TimerKind, TimerSlot, TimerToken};
use crate::types::Product;

// =============================================================================
// Constants
// =============================================================================

/// Default delay between automatic advances.
pub const DEFAULT_AUTO_ADVANCE_INTERVAL: Duration = Duration::from_millis(2000);

/// Duration of the cross-fade; must match the visual transition.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(500);

/// How long auto-advance stays paused after manual navigation.
pub const DEFAULT_MANUAL_COOLDOWN: Duration = Duration::from_millis(10_000);

pub const PREVIOUS_LABEL: &str = "Previous item";
pub const NEXT_LABEL: &str = "Next item";
pub const PLAY_LABEL: &str = "Play video";
pub const PAUSE_LABEL: &str = "Pause video";

// =============================================================================
// Configuration
// =============================================================================

/// Timing options of a carousel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    pub auto_advance_interval: Duration,
    pub transition_duration: Duration,
    pub manual_cooldown: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        CarouselConfig {
            auto_advance_interval: DEFAULT_AUTO_ADVANCE_INTERVAL,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            manual_cooldown: DEFAULT_MANUAL_COOLDOWN,
        }
    }
}

// =============================================================================
// Inputs and Effects
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// A rendered video element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSlot {
    Inline,
    Maximized,
}

/// Where a click on the maximized overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayTarget {
    Backdrop,
    Media,
}

/// Request to start a video (muted, looped, inline playback).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackRequest {
    pub slot: MediaSlot,
    /// Index of the media item; echoed back with the result.
    pub index: usize,
    pub source: String,
}

/// Side effect requested by the carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselEffect {
    /// Call back `handle_timer(token)` once `after` has elapsed.
    ArmTimer { token: TimerToken, after: Duration },
    /// Drop a previously armed timer; it must not fire.
    CancelTimer(TimerToken),
    /// Start playback, then report through `handle_playback`.
    Play(PlaybackRequest),
    /// Pause the video element of `slot`.
    Pause { slot: MediaSlot },
}

// =============================================================================
// Snapshots
// =============================================================================

/// Observable carousel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselState {
    pub current_index: usize,
    pub pending_index: usize,
    pub is_transitioning: bool,
    pub is_auto_paused: bool,
    pub is_video_playing: bool,
    pub is_maximized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselStatus {
    /// No media: nothing is rendered, no work is scheduled.
    Empty,
    Idle(usize),
    Transitioning { from: usize, to: usize },
    /// Idle with auto-advance paused by manual navigation.
    Paused(usize),
}

/// One slide of the render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideView {
    pub index: usize,
    pub kind: MediaKind,
    pub source: String,
    pub alt: String,
    /// Fully opaque: the current slide, and the incoming one mid-transition.
    pub visible: bool,
}

/// Render model of a carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselView {
    pub slides: Vec<SlideView>,
    pub show_navigation: bool,
    pub previous_label: &'static str,
    pub next_label: &'static str,
    /// Present only while the current item is a video.
    pub playback_label: Option<&'static str>,
    pub maximized: bool,
}

// =============================================================================
// Media Carousel
// =============================================================================

/// A carousel instance. Owned by exactly one view; never shared.
#[derive(Debug, Clone)]
pub struct MediaCarousel {
    items: Vec<MediaItem>,
    config: CarouselConfig,

    current: usize,
    pending: usize,
    transitioning: bool,
    auto_paused: bool,
    video_playing: bool,
    maximized: bool,

    /// Set by `start`, cleared by `teardown`. Inactive instances ignore input.
    active: bool,

    /// The play request whose result is still outstanding.
    pending_play: Option<(MediaSlot, usize)>,

    auto_advance: TimerSlot,
    transition: TimerSlot,
    cooldown: TimerSlot,
}

impl MediaCarousel {
    pub fn new(items: Vec<MediaItem>, config: CarouselConfig) -> Self {
        MediaCarousel {
            items,
            config,
            current: 0,
            pending: 0,
            transitioning: false,
            auto_paused: false,
            video_playing: false,
            maximized: false,
            active: false,
            pending_play: None,
            auto_advance: TimerSlot::new(TimerKind::AutoAdvance),
            transition: TimerSlot::new(TimerKind::Transition),
            cooldown: TimerSlot::new(TimerKind::ManualCooldown),
        }
    }

    /// Carousel over a product's images followed by its videos.
    pub fn for_product(product: &Product, config: CarouselConfig) -> Self {
        Self::new(product.media(), config)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.items.get(self.current)
    }

    /// The armed token of a timer slot, if any.
    pub fn armed_timer(&self, kind: TimerKind) -> Option<TimerToken> {
        match kind {
            TimerKind::AutoAdvance => self.auto_advance.token(),
            TimerKind::Transition => self.transition.token(),
            TimerKind::ManualCooldown => self.cooldown.token(),
        }
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            current_index: self.current,
            pending_index: self.pending,
            is_transitioning: self.transitioning,
            is_auto_paused: self.auto_paused,
            is_video_playing: self.video_playing,
            is_maximized: self.maximized,
        }
    }

    pub fn status(&self) -> CarouselStatus {
        if self.items.is_empty() {
            CarouselStatus::Empty
        } else if self.transitioning {
            CarouselStatus::Transitioning {
                from: self.current,
                to: self.pending,
            }
        } else if self.auto_paused {
            CarouselStatus::Paused(self.current)
        } else {
            CarouselStatus::Idle(self.current)
        }
    }

    /// The video slot currently on screen.
    pub fn active_slot(&self) -> MediaSlot {
        if self.maximized {
            MediaSlot::Maximized
        } else {
            MediaSlot::Inline
        }
    }

    /// Render model; `title` is used for the slides' alt text.
    pub fn view(&self, title: &str) -> CarouselView {
        let slides = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| SlideView {
                index,
                kind: item.kind,
                source: item.source.clone(),
                alt: format!("{} {}", title, index + 1),
                visible: index == self.current || (self.transitioning && index == self.pending),
            })
            .collect();

        let playback_label = self.current_is_video().then_some(if self.video_playing {
            PAUSE_LABEL
        } else {
            PLAY_LABEL
        });

        CarouselView {
            slides,
            show_navigation: self.items.len() > 1,
            previous_label: PREVIOUS_LABEL,
            next_label: NEXT_LABEL,
            playback_label,
            maximized: self.maximized,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Activates the instance (the view was mounted).
    pub fn start(&mut self) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        if self.active {
            return effects;
        }
        self.active = true;

        if self.items.is_empty() {
            debug!("Carousel has no media, nothing to schedule");
            return effects;
        }

        self.enter_current(&mut effects);
        self.rearm_auto_advance(&mut effects);
        effects
    }

    /// Cancels every timer and stops playback. Later input is ignored.
    pub fn teardown(&mut self) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        if !self.active {
            return effects;
        }

        self.cancel_all_timers(&mut effects);
        self.leave_current(&mut effects);

        self.active = false;
        self.transitioning = false;
        self.pending = self.current;
        self.auto_paused = false;
        self.maximized = false;

        debug!(index = self.current, "Carousel torn down");
        effects
    }

    /// Replaces the media sequence when the product's media changed.
    ///
    /// An identical sequence is a no-op; otherwise the carousel restarts at
    /// the first item. A pending manual cooldown is kept.
    pub fn replace_media(&mut self, items: Vec<MediaItem>) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        if items == self.items {
            return effects;
        }

        if self.active {
            self.cancel_timer(TimerKind::AutoAdvance, &mut effects);
            self.cancel_timer(TimerKind::Transition, &mut effects);
            self.leave_current(&mut effects);
        }

        debug!(count = items.len(), "Carousel media replaced");
        self.items = items;
        self.current = 0;
        self.pending = 0;
        self.transitioning = false;
        if self.items.is_empty() {
            self.maximized = false;
        }

        if self.active && !self.items.is_empty() {
            self.enter_current(&mut effects);
            self.rearm_auto_advance(&mut effects);
        }
        effects
    }

    /// Recomputes the sequence from raw product media strings.
    pub fn sync_product_media(
        &mut self,
        images: Option<&str>,
        videos: Option<&str>,
    ) -> Vec<CarouselEffect> {
        self.replace_media(media_sequence(images, videos))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Starts a transition to the neighbouring item (wrapping around).
    ///
    /// No-op with fewer than two items, while a transition is in flight, or
    /// when the instance is inactive.
    pub fn advance(&mut self, direction: Direction) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        self.begin_transition(direction, &mut effects);
        effects
    }

    /// User-triggered prev/next.
    ///
    /// Pauses auto-advance and (re)arms the cooldown that resumes it.
    pub fn navigate(&mut self, direction: Direction) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        if !self.active || self.items.len() <= 1 {
            return effects;
        }
        if self.transitioning {
            debug!(?direction, "Manual navigation ignored during transition");
            return effects;
        }

        self.auto_paused = true;
        self.arm_timer(TimerKind::ManualCooldown, self.config.manual_cooldown, &mut effects);
        self.begin_transition(direction, &mut effects);
        effects
    }

    /// Feeds a timer firing back into the machine.
    pub fn handle_timer(&mut self, token: TimerToken) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        if !self.active {
            return effects;
        }

        let accepted = match token.kind {
            TimerKind::AutoAdvance => self.auto_advance.fire(token),
            TimerKind::Transition => self.transition.fire(token),
            TimerKind::ManualCooldown => self.cooldown.fire(token),
        };
        if !accepted {
            trace!(?token, "Stale timer firing ignored");
            return effects;
        }

        match token.kind {
            TimerKind::AutoAdvance => {
                self.begin_transition(Direction::Forward, &mut effects);
            }
            TimerKind::Transition => self.commit_transition(&mut effects),
            TimerKind::ManualCooldown => {
                debug!("Manual cooldown elapsed, resuming auto-advance");
                self.auto_paused = false;
                self.rearm_auto_advance(&mut effects);
            }
        }
        effects
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Play/pause control of the current video.
    pub fn toggle_playback(&mut self, slot: MediaSlot) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        if !self.active || !self.current_is_video() {
            return effects;
        }
        if slot != self.active_slot() {
            debug!(?slot, "Playback toggle for hidden slot ignored");
            return effects;
        }

        if self.video_playing {
            self.video_playing = false;
            self.pending_play = None;
            effects.push(CarouselEffect::Pause { slot });
        } else {
            self.request_play(&mut effects);
        }
        effects
    }

    /// Result of a [`CarouselEffect::Play`].
    ///
    /// Failures are logged and leave the video "not playing"; they never
    /// propagate. Results of superseded requests are ignored.
    pub fn handle_playback(
        &mut self,
        slot: MediaSlot,
        index: usize,
        result: Result<(), PlaybackError>,
    ) {
        if !self.active || self.pending_play != Some((slot, index)) {
            trace!(?slot, index, "Stale playback result ignored");
            return;
        }
        self.pending_play = None;

        match result {
            Ok(()) => {
                self.video_playing = true;
                debug!(?slot, index, "Video playing");
            }
            Err(error) => {
                self.video_playing = false;
                warn!(%error, ?slot, index, "Video playback was prevented");
            }
        }
    }

    // =========================================================================
    // Maximized Overlay
    // =========================================================================

    pub fn maximize(&mut self) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        if self.active && !self.items.is_empty() && !self.maximized {
            self.set_maximized(true, &mut effects);
        }
        effects
    }

    pub fn restore(&mut self) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        if self.active && self.maximized {
            self.set_maximized(false, &mut effects);
        }
        effects
    }

    pub fn toggle_maximized(&mut self) -> Vec<CarouselEffect> {
        if self.maximized {
            self.restore()
        } else {
            self.maximize()
        }
    }

    /// Clicking the backdrop closes the overlay; clicks on the media don't.
    pub fn handle_overlay_click(&mut self, target: OverlayTarget) -> Vec<CarouselEffect> {
        match target {
            OverlayTarget::Backdrop => self.restore(),
            OverlayTarget::Media => Vec::new(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn current_is_video(&self) -> bool {
        self.current_item().is_some_and(MediaItem::is_video)
    }

    fn begin_transition(&mut self, direction: Direction, effects: &mut Vec<CarouselEffect>) -> bool {
        if !self.active || self.items.len() <= 1 || self.transitioning {
            return false;
        }

        let len = self.items.len();
        let target = match direction {
            Direction::Forward => (self.current + 1) % len,
            Direction::Backward => (self.current + len - 1) % len,
        };

        self.pending = target;
        self.transitioning = true;
        self.cancel_timer(TimerKind::AutoAdvance, effects);
        self.arm_timer(TimerKind::Transition, self.config.transition_duration, effects);

        trace!(from = self.current, to = target, "Transition started");
        true
    }

    fn commit_transition(&mut self, effects: &mut Vec<CarouselEffect>) {
        self.leave_current(effects);
        self.current = self.pending;
        self.transitioning = false;
        self.enter_current(effects);
        self.rearm_auto_advance(effects);
    }

    fn enter_current(&mut self, effects: &mut Vec<CarouselEffect>) {
        self.video_playing = false;
        self.pending_play = None;
        if self.current_is_video() {
            self.request_play(effects);
        }
    }

    fn leave_current(&mut self, effects: &mut Vec<CarouselEffect>) {
        if self.current_is_video() {
            effects.push(CarouselEffect::Pause {
                slot: self.active_slot(),
            });
        }
        self.video_playing = false;
        self.pending_play = None;
    }

    fn set_maximized(&mut self, maximized: bool, effects: &mut Vec<CarouselEffect>) {
        self.leave_current(effects);
        self.maximized = maximized;
        self.enter_current(effects);
    }

    fn request_play(&mut self, effects: &mut Vec<CarouselEffect>) {
        let Some(item) = self.items.get(self.current) else {
            return;
        };
        let slot = self.active_slot();
        self.pending_play = Some((slot, self.current));
        effects.push(CarouselEffect::Play(PlaybackRequest {
            slot,
            index: self.current,
            source: item.source.clone(),
        }));
    }

    fn auto_advance_eligible(&self) -> bool {
        self.active
            && self.items.len() > 1
            && !self.transitioning
            && !self.auto_paused
            && !self.current_is_video()
    }

    fn rearm_auto_advance(&mut self, effects: &mut Vec<CarouselEffect>) {
        self.cancel_timer(TimerKind::AutoAdvance, effects);
        if self.auto_advance_eligible() {
            self.arm_timer(
                TimerKind::AutoAdvance,
                self.config.auto_advance_interval,
                effects,
            );
        }
    }

    fn slot_mut(&mut self, kind: TimerKind) -> &mut TimerSlot {
        match kind {
            TimerKind::AutoAdvance => &mut self.auto_advance,
            TimerKind::Transition => &mut self.transition,
            TimerKind::ManualCooldown => &mut self.cooldown,
        }
    }

    fn arm_timer(&mut self, kind: TimerKind, after: Duration, effects: &mut Vec<CarouselEffect>) {
        let (replaced, token) = self.slot_mut(kind).arm();
        if let Some(old) = replaced {
            effects.push(CarouselEffect::CancelTimer(old));
        }
        effects.push(CarouselEffect::ArmTimer { token, after });
    }

    fn cancel_timer(&mut self, kind: TimerKind, effects: &mut Vec<CarouselEffect>) {
        if let Some(token) = self.slot_mut(kind).cancel() {
            effects.push(CarouselEffect::CancelTimer(token));
        }
    }

    fn cancel_all_timers(&mut self, effects: &mut Vec<CarouselEffect>) {
        for kind in [
            TimerKind::AutoAdvance,
            TimerKind::Transition,
            TimerKind::ManualCooldown,
        ] {
            self.cancel_timer(kind, effects);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<MediaItem> {
        (0..n).map(|i| MediaItem::image(format!("{i}.jpg"))).collect()
    }

    fn started(items: Vec<MediaItem>) -> MediaCarousel {
        let mut carousel = MediaCarousel::new(items, CarouselConfig::default());
        carousel.start();
        carousel
    }

    /// Fires the armed timer of `kind`, panicking if none is armed.
    fn fire(carousel: &mut MediaCarousel, kind: TimerKind) -> Vec<CarouselEffect> {
        let token = carousel
            .armed_timer(kind)
            .unwrap_or_else(|| panic!("{kind:?} timer is not armed"));
        carousel.handle_timer(token)
    }

    fn step(carousel: &mut MediaCarousel, direction: Direction) {
        carousel.advance(direction);
        fire(carousel, TimerKind::Transition);
    }

    fn plays(effects: &[CarouselEffect]) -> Vec<&PlaybackRequest> {
        effects
            .iter()
            .filter_map(|e| match e {
                CarouselEffect::Play(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn pauses(effects: &[CarouselEffect]) -> Vec<MediaSlot> {
        effects
            .iter()
            .filter_map(|e| match e {
                CarouselEffect::Pause { slot } => Some(*slot),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        for direction in [Direction::Forward, Direction::Backward] {
            let mut carousel = started(images(4));
            for _ in 0..4 {
                step(&mut carousel, direction);
            }
            assert_eq!(carousel.state().current_index, 0);
        }
    }

    #[test]
    fn test_backward_wraps_to_last_item() {
        let mut carousel = started(images(3));
        step(&mut carousel, Direction::Backward);
        assert_eq!(carousel.state().current_index, 2);
        step(&mut carousel, Direction::Forward);
        assert_eq!(carousel.state().current_index, 0);
    }

    #[test]
    fn test_advance_noop_with_single_or_no_item() {
        for count in [0, 1] {
            let mut carousel = started(images(count));
            assert!(carousel.advance(Direction::Forward).is_empty());
            assert!(carousel.navigate(Direction::Backward).is_empty());
            assert!(!carousel.state().is_transitioning);
            assert!(carousel.armed_timer(TimerKind::AutoAdvance).is_none());
        }
    }

    #[test]
    fn test_advance_noop_while_transitioning() {
        let mut carousel = started(images(3));
        carousel.advance(Direction::Forward);
        assert_eq!(
            carousel.status(),
            CarouselStatus::Transitioning { from: 0, to: 1 }
        );

        assert!(carousel.advance(Direction::Forward).is_empty());
        assert_eq!(carousel.state().pending_index, 1);
    }

    #[test]
    fn test_manual_navigation_ignored_mid_transition() {
        let mut carousel = started(images(3));
        carousel.advance(Direction::Forward);
        let transition = carousel.armed_timer(TimerKind::Transition);

        assert!(carousel.navigate(Direction::Backward).is_empty());
        let state = carousel.state();
        assert_eq!(state.pending_index, 1);
        assert!(!state.is_auto_paused);
        assert_eq!(carousel.armed_timer(TimerKind::Transition), transition);
    }

    #[test]
    fn test_transition_commits_after_configured_delay() {
        let mut carousel = started(images(2));
        let effects = carousel.advance(Direction::Forward);

        let armed = effects.iter().find_map(|e| match e {
            CarouselEffect::ArmTimer { token, after } if token.kind == TimerKind::Transition => {
                Some(*after)
            }
            _ => None,
        });
        assert_eq!(armed, Some(DEFAULT_TRANSITION_DURATION));

        fire(&mut carousel, TimerKind::Transition);
        assert_eq!(carousel.status(), CarouselStatus::Idle(1));
        assert_eq!(carousel.state().pending_index, 1);
    }

    #[test]
    fn test_auto_advance_cycle() {
        let mut carousel = MediaCarousel::new(images(3), CarouselConfig::default());
        let effects = carousel.start();
        assert!(effects.iter().any(|e| matches!(
            e,
            CarouselEffect::ArmTimer { token, after }
                if token.kind == TimerKind::AutoAdvance && *after == DEFAULT_AUTO_ADVANCE_INTERVAL
        )));

        let first = carousel.armed_timer(TimerKind::AutoAdvance);
        fire(&mut carousel, TimerKind::AutoAdvance);
        assert!(carousel.state().is_transitioning);
        assert!(carousel.armed_timer(TimerKind::AutoAdvance).is_none());

        fire(&mut carousel, TimerKind::Transition);
        assert_eq!(carousel.state().current_index, 1);
        let second = carousel.armed_timer(TimerKind::AutoAdvance);
        assert!(second.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn test_manual_navigation_pauses_until_cooldown() {
        let mut carousel = started(images(3));
        let stale_auto = carousel.armed_timer(TimerKind::AutoAdvance).unwrap();

        let effects = carousel.navigate(Direction::Forward);
        assert!(effects.contains(&CarouselEffect::CancelTimer(stale_auto)));
        assert!(carousel.state().is_auto_paused);

        fire(&mut carousel, TimerKind::Transition);
        assert_eq!(carousel.status(), CarouselStatus::Paused(1));
        assert!(carousel.armed_timer(TimerKind::AutoAdvance).is_none());

        // The cancelled auto-advance firing late must not move the carousel.
        assert!(carousel.handle_timer(stale_auto).is_empty());
        assert_eq!(carousel.state().current_index, 1);

        fire(&mut carousel, TimerKind::ManualCooldown);
        assert_eq!(carousel.status(), CarouselStatus::Idle(1));
        assert!(carousel.armed_timer(TimerKind::AutoAdvance).is_some());
    }

    #[test]
    fn test_repeated_navigation_replaces_cooldown() {
        let mut carousel = started(images(3));
        carousel.navigate(Direction::Forward);
        let first_cooldown = carousel.armed_timer(TimerKind::ManualCooldown).unwrap();
        fire(&mut carousel, TimerKind::Transition);

        let effects = carousel.navigate(Direction::Forward);
        assert!(effects.contains(&CarouselEffect::CancelTimer(first_cooldown)));
        fire(&mut carousel, TimerKind::Transition);

        // Only the newest cooldown resumes auto-advance.
        assert!(carousel.handle_timer(first_cooldown).is_empty());
        assert!(carousel.state().is_auto_paused);
        fire(&mut carousel, TimerKind::ManualCooldown);
        assert!(!carousel.state().is_auto_paused);
    }

    #[test]
    fn test_video_item_suspends_auto_advance() {
        let mut carousel = started(vec![
            MediaItem::image("a.jpg"),
            MediaItem::video("b.mp4"),
        ]);

        carousel.advance(Direction::Forward);
        let effects = fire(&mut carousel, TimerKind::Transition);
        let requests = plays(&effects);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].slot, MediaSlot::Inline);
        assert_eq!(requests[0].index, 1);
        assert_eq!(requests[0].source, "b.mp4");
        assert!(carousel.armed_timer(TimerKind::AutoAdvance).is_none());

        carousel.handle_playback(MediaSlot::Inline, 1, Ok(()));
        assert!(carousel.state().is_video_playing);

        carousel.advance(Direction::Forward);
        let effects = fire(&mut carousel, TimerKind::Transition);
        assert_eq!(pauses(&effects), [MediaSlot::Inline]);
        assert!(!carousel.state().is_video_playing);
        assert!(carousel.armed_timer(TimerKind::AutoAdvance).is_some());
    }

    #[test]
    fn test_leaving_video_while_paused_keeps_auto_advance_off() {
        let mut carousel = started(vec![
            MediaItem::video("a.mp4"),
            MediaItem::image("b.jpg"),
        ]);
        carousel.navigate(Direction::Forward);
        fire(&mut carousel, TimerKind::Transition);
        assert!(carousel.armed_timer(TimerKind::AutoAdvance).is_none());
    }

    #[test]
    fn test_start_on_video_plays_immediately() {
        let mut carousel = MediaCarousel::new(
            vec![MediaItem::video("a.mp4"), MediaItem::video("b.mp4")],
            CarouselConfig::default(),
        );
        let effects = carousel.start();
        assert_eq!(plays(&effects).len(), 1);
        assert!(carousel.armed_timer(TimerKind::AutoAdvance).is_none());
    }

    #[test]
    fn test_playback_failure_is_not_playing() {
        let mut carousel = started(vec![MediaItem::video("a.mp4")]);
        carousel.handle_playback(
            MediaSlot::Inline,
            0,
            Err(PlaybackError::AutoplayBlocked("NotAllowedError".into())),
        );
        assert!(!carousel.state().is_video_playing);
        assert_eq!(carousel.view("Clip").playback_label, Some(PLAY_LABEL));

        let effects = carousel.toggle_playback(MediaSlot::Inline);
        assert_eq!(plays(&effects).len(), 1);
        carousel.handle_playback(MediaSlot::Inline, 0, Ok(()));
        assert!(carousel.state().is_video_playing);
        assert_eq!(carousel.view("Clip").playback_label, Some(PAUSE_LABEL));

        let effects = carousel.toggle_playback(MediaSlot::Inline);
        assert_eq!(pauses(&effects), [MediaSlot::Inline]);
        assert!(!carousel.state().is_video_playing);
    }

    #[test]
    fn test_superseded_playback_results_are_ignored() {
        let mut carousel = started(vec![
            MediaItem::video("a.mp4"),
            MediaItem::image("b.jpg"),
        ]);
        carousel.handle_playback(MediaSlot::Inline, 0, Ok(()));
        carousel.toggle_playback(MediaSlot::Inline);

        // A duplicate result after the user paused must not resume.
        carousel.handle_playback(MediaSlot::Inline, 0, Ok(()));
        assert!(!carousel.state().is_video_playing);

        carousel.toggle_playback(MediaSlot::Inline);
        carousel.handle_playback(MediaSlot::Inline, 1, Ok(()));
        assert!(!carousel.state().is_video_playing);

        carousel.handle_playback(MediaSlot::Maximized, 0, Ok(()));
        assert!(!carousel.state().is_video_playing);
    }

    #[test]
    fn test_toggle_playback_on_image_is_noop() {
        let mut carousel = started(images(2));
        assert!(carousel.toggle_playback(MediaSlot::Inline).is_empty());
        assert_eq!(carousel.view("Pizza").playback_label, None);
    }

    #[test]
    fn test_maximize_moves_playback_to_overlay() {
        let mut carousel = started(vec![MediaItem::video("a.mp4"), MediaItem::image("b.jpg")]);
        carousel.handle_playback(MediaSlot::Inline, 0, Ok(()));

        let effects = carousel.maximize();
        assert_eq!(pauses(&effects), [MediaSlot::Inline]);
        assert_eq!(plays(&effects)[0].slot, MediaSlot::Maximized);
        assert!(carousel.state().is_maximized);
        assert!(!carousel.state().is_video_playing);

        // A result for the hidden inline element changes nothing.
        carousel.handle_playback(MediaSlot::Inline, 0, Ok(()));
        assert!(!carousel.state().is_video_playing);
        carousel.handle_playback(MediaSlot::Maximized, 0, Ok(()));
        assert!(carousel.state().is_video_playing);

        assert!(carousel.handle_overlay_click(OverlayTarget::Media).is_empty());
        assert!(carousel.state().is_maximized);

        let effects = carousel.handle_overlay_click(OverlayTarget::Backdrop);
        assert_eq!(pauses(&effects), [MediaSlot::Maximized]);
        assert_eq!(plays(&effects)[0].slot, MediaSlot::Inline);
        assert!(!carousel.state().is_maximized);
    }

    #[test]
    fn test_maximized_view_shares_navigation() {
        let mut carousel = started(images(3));
        carousel.toggle_maximized();
        step(&mut carousel, Direction::Forward);
        assert_eq!(carousel.state().current_index, 1);
        assert!(carousel.view("Pizza").maximized);

        carousel.toggle_maximized();
        assert!(!carousel.state().is_maximized);
        assert_eq!(carousel.state().current_index, 1);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut carousel = started(images(3));
        carousel.navigate(Direction::Forward);
        let transition = carousel.armed_timer(TimerKind::Transition).unwrap();
        let cooldown = carousel.armed_timer(TimerKind::ManualCooldown).unwrap();

        let effects = carousel.teardown();
        assert!(effects.contains(&CarouselEffect::CancelTimer(transition)));
        assert!(effects.contains(&CarouselEffect::CancelTimer(cooldown)));
        assert!(!carousel.is_active());

        assert!(carousel.handle_timer(transition).is_empty());
        assert!(carousel.navigate(Direction::Forward).is_empty());
        assert_eq!(carousel.state().current_index, 0);
        assert!(!carousel.state().is_transitioning);
    }

    #[test]
    fn test_teardown_pauses_current_video() {
        let mut carousel = started(vec![MediaItem::video("a.mp4")]);
        let effects = carousel.teardown();
        assert_eq!(pauses(&effects), [MediaSlot::Inline]);
    }

    #[test]
    fn test_empty_carousel_does_no_work() {
        let mut carousel = MediaCarousel::new(Vec::new(), CarouselConfig::default());
        assert!(carousel.start().is_empty());
        assert_eq!(carousel.status(), CarouselStatus::Empty);
        assert!(carousel.maximize().is_empty());
        assert!(carousel.view("Nothing").slides.is_empty());
        assert!(carousel.current_item().is_none());
    }

    #[test]
    fn test_view_shows_incoming_slide_during_transition() {
        let mut carousel = started(images(3));
        let view = carousel.view("Pizza");
        assert!(view.show_navigation);
        assert_eq!(view.previous_label, "Previous item");
        assert_eq!(view.slides[1].alt, "Pizza 2");
        let visible: Vec<usize> = view.slides.iter().filter(|s| s.visible).map(|s| s.index).collect();
        assert_eq!(visible, [0]);

        carousel.advance(Direction::Forward);
        let view = carousel.view("Pizza");
        let visible: Vec<usize> = view.slides.iter().filter(|s| s.visible).map(|s| s.index).collect();
        assert_eq!(visible, [0, 1]);
    }

    #[test]
    fn test_single_item_hides_navigation() {
        let carousel = started(images(1));
        assert!(!carousel.view("Pizza").show_navigation);
    }

    #[test]
    fn test_replace_media_restarts_sequence() {
        let mut carousel = started(images(3));
        step(&mut carousel, Direction::Forward);

        assert!(carousel.replace_media(images(3)).is_empty());
        assert_eq!(carousel.state().current_index, 1);

        let effects = carousel.sync_product_media(Some("x.jpg"), Some("y.mp4"));
        assert_eq!(carousel.state().current_index, 0);
        assert_eq!(carousel.len(), 2);
        assert!(plays(&effects).is_empty());
        assert!(carousel.armed_timer(TimerKind::AutoAdvance).is_some());

        carousel.replace_media(Vec::new());
        assert_eq!(carousel.status(), CarouselStatus::Empty);
        assert!(carousel.armed_timer(TimerKind::AutoAdvance).is_none());
    }
}
