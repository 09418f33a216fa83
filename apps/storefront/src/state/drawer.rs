//! # Drawer State
//!
//! The cart item drawer: at most one is open at a time.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   closed ──open(A)──► open(A) ──open(B)──► open(B)                      │
//! │     ▲                   │  │     A's carousel shut down                 │
//! │     │                   │  │                                            │
//! │     └──── close() ──────┘  └── submit ok ──► item to cart, closed       │
//! │                                                                         │
//! │   open drawer = OptionSelectionForm + CarouselHandle (if any media)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reopening a product always starts from a fresh form and a fresh carousel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::{CarouselConfig, CartItem, MediaCarousel, OptionSelectionForm, SubmitOutcome};
use tracing::{debug, info};

use crate::driver::{CarouselDriver, CarouselHandle};
use crate::error::{ApiError, ApiResult};
use crate::player::MediaPlayer;

/// A drawer on screen.
struct OpenDrawer {
    form: OptionSelectionForm,
    /// `None` when the product has no media.
    carousel: Option<CarouselHandle>,
}

/// Outcome of [`DrawerState::submit`].
#[derive(Debug)]
pub enum Submission<R> {
    /// The item was committed and the drawer closed.
    Committed(R),
    /// Categories still without a choice; the drawer stays open.
    Incomplete(Vec<String>),
}

pub struct DrawerState {
    open: Mutex<Option<OpenDrawer>>,
    player: Arc<dyn MediaPlayer>,
}

impl DrawerState {
    pub fn new(player: Arc<dyn MediaPlayer>) -> Self {
        DrawerState {
            open: Mutex::new(None),
            player,
        }
    }

    /// Shows `form` in the drawer, closing whatever was open before.
    ///
    /// Must be called from within a tokio runtime: the carousel (if the
    /// product has media) is started as a task.
    pub async fn open(&self, form: OptionSelectionForm, config: CarouselConfig) {
        let product = form.product();
        let carousel = MediaCarousel::for_product(product, config);
        let handle = (!carousel.is_empty()).then(|| {
            CarouselDriver::spawn(carousel, product.title.clone(), Arc::clone(&self.player))
        });

        info!(
            product_id = %product.id,
            has_media = handle.is_some(),
            "Drawer opened"
        );

        let previous = self.slot().replace(OpenDrawer {
            form,
            carousel: handle,
        });
        if let Some(previous) = previous {
            shut_down(previous).await;
        }
    }

    /// Closes the drawer. Returns whether one was open.
    pub async fn close(&self) -> bool {
        let previous = self.slot().take();
        match previous {
            Some(drawer) => {
                shut_down(drawer).await;
                true
            }
            None => false,
        }
    }

    /// Submits the open form.
    ///
    /// A complete item goes to `commit`. When that succeeds the drawer is
    /// taken out of the slot under the same lock, so a drawer opened
    /// concurrently is never the one closed.
    ///
    /// ## Errors
    /// - `DRAWER_ERROR` when no drawer is open or it was already submitted
    /// - whatever `commit` returns (the drawer then stays open)
    pub async fn submit<F, R>(&self, commit: F) -> ApiResult<Submission<R>>
    where
        F: FnOnce(CartItem) -> ApiResult<R>,
    {
        let (committed, submitted) = {
            let mut slot = self.slot();
            let drawer = slot.as_mut().ok_or_else(ApiError::drawer_closed)?;
            match drawer.form.submit()? {
                SubmitOutcome::Incomplete { missing } => {
                    return Ok(Submission::Incomplete(missing));
                }
                SubmitOutcome::Submitted(item) => {
                    let committed = commit(item)?;
                    (committed, slot.take())
                }
            }
        };

        if let Some(drawer) = submitted {
            shut_down(drawer).await;
        }
        Ok(Submission::Committed(committed))
    }

    pub fn is_open(&self) -> bool {
        self.slot().is_some()
    }

    /// Id of the product in the open drawer.
    pub fn product_id(&self) -> Option<String> {
        self.slot()
            .as_ref()
            .map(|drawer| drawer.form.product().id.clone())
    }

    /// Runs `f` against the open form.
    ///
    /// ## Errors
    /// `DRAWER_ERROR` when no drawer is open.
    pub fn with_form<F, R>(&self, f: F) -> ApiResult<R>
    where
        F: FnOnce(&mut OptionSelectionForm) -> R,
    {
        let mut slot = self.slot();
        let drawer = slot.as_mut().ok_or_else(ApiError::drawer_closed)?;
        Ok(f(&mut drawer.form))
    }

    /// Handle of the open drawer's carousel.
    ///
    /// ## Errors
    /// - `DRAWER_ERROR` when no drawer is open
    /// - `MEDIA_ERROR` when the product has no media
    pub fn carousel(&self) -> ApiResult<CarouselHandle> {
        let slot = self.slot();
        let drawer = slot.as_ref().ok_or_else(ApiError::drawer_closed)?;
        drawer.carousel.clone().ok_or_else(ApiError::no_media)
    }

    fn slot(&self) -> MutexGuard<'_, Option<OpenDrawer>> {
        self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn shut_down(drawer: OpenDrawer) {
    let product_id = drawer.form.product().id.clone();
    if let Some(carousel) = drawer.carousel {
        // Already stopped is fine.
        if let Err(e) = carousel.shutdown().await {
            debug!(product_id = %product_id, error = %e, "Carousel already stopped");
        }
    }
    info!(product_id = %product_id, "Drawer closed");
}
