//! # Carousel Driver
//!
//! Runs one [`MediaCarousel`] on tokio: executes its effects and feeds timer
//! firings and playback results back into it.
//!
//! ## Actor Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CarouselHandle (Clone) ──commands──►┌──────────────────────────┐       │
//! │  navigate / toggle / maximize / ...  │     CarouselDriver       │       │
//! │                                      │  owns MediaCarousel      │       │
//! │                 ┌──── events ───────►│  timers: kind → task     │       │
//! │                 │                    └────────────┬─────────────┘       │
//! │                 │                                 │ effects             │
//! │   ┌─────────────┴───────────┐                     ▼                     │
//! │   │ sleep(after) tasks      │◄──── ArmTimer / CancelTimer (abort)       │
//! │   │ player.play() tasks     │◄──── Play                                 │
//! │   └─────────────────────────┘      Pause ──► player.pause(slot)         │
//! │                                                                         │
//! │  All handles dropped or shutdown() ──► teardown: timers aborted,        │
//! │                                         video paused, task exits        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Aborting a sleep task is best effort; a firing that slips through carries
//! a stale token and is ignored by the state machine.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use storefront_core::carousel::CarouselView;
use storefront_core::{
    CarouselEffect, CarouselState, Direction, MediaCarousel, MediaItem, MediaSlot, OverlayTarget,
    PlaybackError, PlaybackRequest, TimerKind, TimerToken,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::error::{AppError, AppResult};
use crate::player::MediaPlayer;

/// Capacity of the command channel.
const COMMAND_BUFFER: usize = 64;

// =============================================================================
// Messages
// =============================================================================

#[derive(Debug)]
enum CarouselCommand {
    Navigate(Direction),
    TogglePlayback(MediaSlot),
    Maximize,
    Restore,
    ClickOverlay(OverlayTarget),
    ReplaceMedia(Vec<MediaItem>),
    State(oneshot::Sender<CarouselState>),
    View(oneshot::Sender<CarouselView>),
    Shutdown(oneshot::Sender<()>),
}

/// Completions posted by timer and playback tasks.
#[derive(Debug)]
enum DriverEvent {
    TimerFired(TimerToken),
    PlaybackFinished {
        slot: MediaSlot,
        index: usize,
        result: Result<(), PlaybackError>,
    },
}

// =============================================================================
// Handle
// =============================================================================

/// Handle for controlling a running carousel.
///
/// The carousel lives as long as at least one handle does.
#[derive(Debug, Clone)]
pub struct CarouselHandle {
    cmd_tx: mpsc::Sender<CarouselCommand>,
}

impl CarouselHandle {
    /// Manual prev/next.
    pub async fn navigate(&self, direction: Direction) -> AppResult<()> {
        self.send(CarouselCommand::Navigate(direction)).await
    }

    pub async fn toggle_playback(&self, slot: MediaSlot) -> AppResult<()> {
        self.send(CarouselCommand::TogglePlayback(slot)).await
    }

    pub async fn maximize(&self) -> AppResult<()> {
        self.send(CarouselCommand::Maximize).await
    }

    pub async fn restore(&self) -> AppResult<()> {
        self.send(CarouselCommand::Restore).await
    }

    pub async fn click_overlay(&self, target: OverlayTarget) -> AppResult<()> {
        self.send(CarouselCommand::ClickOverlay(target)).await
    }

    /// Swaps the media sequence (no-op when unchanged).
    pub async fn replace_media(&self, items: Vec<MediaItem>) -> AppResult<()> {
        self.send(CarouselCommand::ReplaceMedia(items)).await
    }

    pub async fn state(&self) -> AppResult<CarouselState> {
        let (tx, rx) = oneshot::channel();
        self.send(CarouselCommand::State(tx)).await?;
        rx.await.map_err(|_| AppError::CarouselStopped)
    }

    pub async fn view(&self) -> AppResult<CarouselView> {
        let (tx, rx) = oneshot::channel();
        self.send(CarouselCommand::View(tx)).await?;
        rx.await.map_err(|_| AppError::CarouselStopped)
    }

    /// Tears the carousel down and waits until it has stopped.
    pub async fn shutdown(&self) -> AppResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(CarouselCommand::Shutdown(tx)).await?;
        rx.await.map_err(|_| AppError::CarouselStopped)
    }

    /// Whether the carousel has stopped.
    pub fn is_closed(&self) -> bool {
        self.cmd_tx.is_closed()
    }

    async fn send(&self, cmd: CarouselCommand) -> AppResult<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| AppError::CarouselStopped)
    }
}

// =============================================================================
// Driver
// =============================================================================

pub struct CarouselDriver {
    carousel: MediaCarousel,
    /// Used for slide alt text.
    title: String,
    player: Arc<dyn MediaPlayer>,
    timers: HashMap<TimerKind, (TimerToken, JoinHandle<()>)>,
    event_tx: mpsc::UnboundedSender<DriverEvent>,
}

impl CarouselDriver {
    /// Starts `carousel` on the current runtime and returns its handle.
    pub fn spawn(
        carousel: MediaCarousel,
        title: impl Into<String>,
        player: Arc<dyn MediaPlayer>,
    ) -> CarouselHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let driver = CarouselDriver {
            carousel,
            title: title.into(),
            player,
            timers: HashMap::new(),
            event_tx,
        };

        tokio::spawn(driver.run(cmd_rx, event_rx));

        CarouselHandle { cmd_tx }
    }

    /// Main actor loop.
    async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<CarouselCommand>,
        mut event_rx: mpsc::UnboundedReceiver<DriverEvent>,
    ) {
        info!(title = %self.title, items = self.carousel.len(), "Carousel started");
        let effects = self.carousel.start();
        self.apply(effects);

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(CarouselCommand::Shutdown(ack)) => {
                        cmd_rx.close();
                        self.stop();
                        let _ = ack.send(());
                        break;
                    }
                    Some(cmd) => self.handle_command(cmd),
                    None => {
                        debug!(title = %self.title, "All carousel handles dropped");
                        self.stop();
                        break;
                    }
                },
                Some(event) = event_rx.recv() => self.handle_event(event),
            }
        }

        info!(title = %self.title, "Carousel stopped");
    }

    fn handle_command(&mut self, cmd: CarouselCommand) {
        let effects = match cmd {
            CarouselCommand::Navigate(direction) => self.carousel.navigate(direction),
            CarouselCommand::TogglePlayback(slot) => self.carousel.toggle_playback(slot),
            CarouselCommand::Maximize => self.carousel.maximize(),
            CarouselCommand::Restore => self.carousel.restore(),
            CarouselCommand::ClickOverlay(target) => self.carousel.handle_overlay_click(target),
            CarouselCommand::ReplaceMedia(items) => self.carousel.replace_media(items),
            CarouselCommand::State(reply) => {
                let _ = reply.send(self.carousel.state());
                return;
            }
            CarouselCommand::View(reply) => {
                let _ = reply.send(self.carousel.view(&self.title));
                return;
            }
            // Handled by the run loop.
            CarouselCommand::Shutdown(_) => return,
        };
        self.apply(effects);
    }

    fn handle_event(&mut self, event: DriverEvent) {
        match event {
            DriverEvent::TimerFired(token) => {
                if self
                    .timers
                    .get(&token.kind)
                    .is_some_and(|(armed, _)| *armed == token)
                {
                    self.timers.remove(&token.kind);
                }
                let effects = self.carousel.handle_timer(token);
                self.apply(effects);
            }
            DriverEvent::PlaybackFinished {
                slot,
                index,
                result,
            } => self.carousel.handle_playback(slot, index, result),
        }
    }

    fn apply(&mut self, effects: Vec<CarouselEffect>) {
        for effect in effects {
            match effect {
                CarouselEffect::ArmTimer { token, after } => self.arm(token, after),
                CarouselEffect::CancelTimer(token) => self.cancel(token),
                CarouselEffect::Play(request) => self.play(request),
                CarouselEffect::Pause { slot } => self.player.pause(slot),
            }
        }
    }

    fn arm(&mut self, token: TimerToken, after: Duration) {
        trace!(?token, ?after, "Arming timer");
        let tx = self.event_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(DriverEvent::TimerFired(token));
        });

        if let Some((_, previous)) = self.timers.insert(token.kind, (token, task)) {
            previous.abort();
        }
    }

    fn cancel(&mut self, token: TimerToken) {
        let armed = self
            .timers
            .get(&token.kind)
            .is_some_and(|(current, _)| *current == token);
        if armed {
            if let Some((_, task)) = self.timers.remove(&token.kind) {
                task.abort();
            }
        }
    }

    fn play(&self, request: PlaybackRequest) {
        let player = Arc::clone(&self.player);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = player.play(&request).await;
            let _ = tx.send(DriverEvent::PlaybackFinished {
                slot: request.slot,
                index: request.index,
                result,
            });
        });
    }

    fn stop(&mut self) {
        let effects = self.carousel.teardown();
        self.apply(effects);
        for (_, (_, task)) in self.timers.drain() {
            task.abort();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{HeadlessPlayer, PlayerEvent};
    use storefront_core::CarouselConfig;
    use tokio::time::sleep;

    fn images(n: usize) -> Vec<MediaItem> {
        (0..n).map(|i| MediaItem::image(format!("{i}.jpg"))).collect()
    }

    fn spawn(items: Vec<MediaItem>, player: Arc<HeadlessPlayer>) -> CarouselHandle {
        let carousel = MediaCarousel::new(items, CarouselConfig::default());
        CarouselDriver::spawn(carousel, "Pizza", player)
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_advance_on_schedule() {
        let handle = spawn(images(3), Arc::new(HeadlessPlayer::new()));

        sleep(Duration::from_millis(1900)).await;
        assert_eq!(handle.state().await.unwrap().current_index, 0);

        // 2000ms interval + 500ms transition
        sleep(Duration::from_millis(700)).await;
        assert_eq!(handle.state().await.unwrap().current_index, 1);

        sleep(Duration::from_millis(2500)).await;
        assert_eq!(handle.state().await.unwrap().current_index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_pauses_auto_advance() {
        let handle = spawn(images(3), Arc::new(HeadlessPlayer::new()));

        handle.navigate(Direction::Backward).await.unwrap();
        sleep(Duration::from_millis(600)).await;
        let state = handle.state().await.unwrap();
        assert_eq!(state.current_index, 2);
        assert!(state.is_auto_paused);

        sleep(Duration::from_millis(8000)).await;
        assert_eq!(handle.state().await.unwrap().current_index, 2);

        // Cooldown ends at 10s, next advance commits at 12.5s.
        sleep(Duration::from_millis(4000)).await;
        let state = handle.state().await.unwrap();
        assert!(!state.is_auto_paused);
        assert_eq!(state.current_index, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_during_transition_is_ignored() {
        let handle = spawn(images(3), Arc::new(HeadlessPlayer::new()));

        handle.navigate(Direction::Forward).await.unwrap();
        handle.navigate(Direction::Forward).await.unwrap();
        sleep(Duration::from_millis(600)).await;
        assert_eq!(handle.state().await.unwrap().current_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_video_plays_and_toggles() {
        let player = Arc::new(HeadlessPlayer::new());
        let handle = spawn(
            vec![MediaItem::video("clip.mp4"), MediaItem::image("a.jpg")],
            player.clone(),
        );

        sleep(Duration::from_millis(10)).await;
        assert!(handle.state().await.unwrap().is_video_playing);

        // A video never auto-advances.
        sleep(Duration::from_millis(5000)).await;
        assert_eq!(handle.state().await.unwrap().current_index, 0);

        handle.toggle_playback(MediaSlot::Inline).await.unwrap();
        assert!(!handle.state().await.unwrap().is_video_playing);
        assert_eq!(
            player.events().last(),
            Some(&PlayerEvent::Paused {
                slot: MediaSlot::Inline
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_autoplay_is_not_fatal() {
        let player = Arc::new(HeadlessPlayer::blocking_autoplay());
        let handle = spawn(vec![MediaItem::video("clip.mp4")], player.clone());

        sleep(Duration::from_millis(10)).await;
        let state = handle.state().await.unwrap();
        assert!(!state.is_video_playing);
        assert_eq!(
            handle.view().await.unwrap().playback_label,
            Some("Play video")
        );
        assert_eq!(
            player.events(),
            vec![PlayerEvent::Played {
                slot: MediaSlot::Inline,
                source: "clip.mp4".to_string()
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_maximize_switches_slot() {
        let player = Arc::new(HeadlessPlayer::new());
        let handle = spawn(vec![MediaItem::video("clip.mp4")], player.clone());
        sleep(Duration::from_millis(10)).await;

        handle.maximize().await.unwrap();
        sleep(Duration::from_millis(10)).await;
        let state = handle.state().await.unwrap();
        assert!(state.is_maximized);
        assert!(state.is_video_playing);
        assert!(player.events().contains(&PlayerEvent::Played {
            slot: MediaSlot::Maximized,
            source: "clip.mp4".to_string()
        }));

        handle.click_overlay(OverlayTarget::Media).await.unwrap();
        assert!(handle.state().await.unwrap().is_maximized);
        handle.click_overlay(OverlayTarget::Backdrop).await.unwrap();
        assert!(!handle.state().await.unwrap().is_maximized);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_the_carousel() {
        let player = Arc::new(HeadlessPlayer::new());
        let handle = spawn(vec![MediaItem::video("clip.mp4")], player.clone());
        sleep(Duration::from_millis(10)).await;

        handle.shutdown().await.unwrap();
        assert!(player.events().contains(&PlayerEvent::Paused {
            slot: MediaSlot::Inline
        }));
        assert!(matches!(
            handle.navigate(Direction::Forward).await,
            Err(AppError::CarouselStopped)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handles_tears_down() {
        let player = Arc::new(HeadlessPlayer::new());
        let handle = spawn(vec![MediaItem::video("clip.mp4")], player.clone());
        sleep(Duration::from_millis(10)).await;

        drop(handle);
        sleep(Duration::from_millis(10)).await;
        assert_eq!(
            player.events().last(),
            Some(&PlayerEvent::Paused {
                slot: MediaSlot::Inline
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_media_restarts() {
        let handle = spawn(images(3), Arc::new(HeadlessPlayer::new()));
        handle.navigate(Direction::Forward).await.unwrap();
        sleep(Duration::from_millis(600)).await;

        handle.replace_media(images(2)).await.unwrap();
        let view = handle.view().await.unwrap();
        assert_eq!(view.slides.len(), 2);
        assert_eq!(view.slides[0].alt, "Pizza 1");
        assert_eq!(handle.state().await.unwrap().current_index, 0);
    }
}
