//! # Media Commands
//!
//! Input for the carousel of the open drawer. Each command forwards to the
//! carousel task and answers with its state and render model afterwards.
//!
//! Playback is asynchronous: right after `toggle_video` the reported
//! `isVideoPlaying` may still reflect the previous state.

use serde::Serialize;
use storefront_core::carousel::CarouselView;
use storefront_core::{CarouselState, Direction, MediaSlot, OverlayTarget};
use tracing::debug;

use crate::driver::CarouselHandle;
use crate::error::ApiResult;
use crate::state::DrawerState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponse {
    pub state: CarouselState,
    pub view: CarouselView,
}

async fn respond(handle: &CarouselHandle) -> ApiResult<MediaResponse> {
    Ok(MediaResponse {
        state: handle.state().await?,
        view: handle.view().await?,
    })
}

/// Manual prev/next. Pauses auto-advance for the cooldown period.
pub async fn navigate_media(drawer: &DrawerState, direction: Direction) -> ApiResult<MediaResponse> {
    debug!(?direction, "navigate_media command");
    let handle = drawer.carousel()?;
    handle.navigate(direction).await?;
    respond(&handle).await
}

/// Play/pause button of a video slot.
pub async fn toggle_video(drawer: &DrawerState, slot: MediaSlot) -> ApiResult<MediaResponse> {
    debug!(?slot, "toggle_video command");
    let handle = drawer.carousel()?;
    handle.toggle_playback(slot).await?;
    respond(&handle).await
}

pub async fn maximize_media(drawer: &DrawerState) -> ApiResult<MediaResponse> {
    debug!("maximize_media command");
    let handle = drawer.carousel()?;
    handle.maximize().await?;
    respond(&handle).await
}

pub async fn restore_media(drawer: &DrawerState) -> ApiResult<MediaResponse> {
    debug!("restore_media command");
    let handle = drawer.carousel()?;
    handle.restore().await?;
    respond(&handle).await
}

/// Click on the maximized overlay. Only a backdrop click restores.
pub async fn click_overlay(drawer: &DrawerState, target: OverlayTarget) -> ApiResult<MediaResponse> {
    debug!(?target, "click_overlay command");
    let handle = drawer.carousel()?;
    handle.click_overlay(target).await?;
    respond(&handle).await
}

pub async fn media_state(drawer: &DrawerState) -> ApiResult<MediaResponse> {
    let handle = drawer.carousel()?;
    respond(&handle).await
}
