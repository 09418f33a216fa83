//! # storefront-core: Pure Interaction Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the two
//! interaction state machines of the cart item drawer as pure, synchronous
//! code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/storefront                              │   │
//! │  │   Product list ──► Drawer (form + carousel) ──► Cart            │   │
//! │  │   tokio timers, media player, config, commands                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ effects ▲ events                       │
//! │  ┌─────────────────────────────▼─────────┴─────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────────┐ ┌──────────────┐  │   │
//! │  │   │  types   │ │  money   │ │   carousel   │ │     form     │  │   │
//! │  │   │ Product  │ │  Money   │ │ MediaCarousel│ │ OptionSelect │  │   │
//! │  │   │ CartItem │ │ Formatter│ │ timer slots  │ │ DraftCartItem│  │   │
//! │  │   └──────────┘ └──────────┘ └──────────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO MEDIA ELEMENTS • PURE STATE           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductOption, CartItem, ...)
//! - [`money`] - Money type with integer arithmetic and currency formatting
//! - [`media`] - Media list parsing (comma-separated image/video strings)
//! - [`timer`] - Generation-checked timer handles
//! - [`carousel`] - The media carousel state machine
//! - [`form`] - The option selection form state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::{CurrencyFormat, Money};
//! use storefront_core::media::{parse_media_list, MediaKind};
//!
//! let items = parse_media_list(Some("a.jpg, b.jpg,,c.jpg"), MediaKind::Image);
//! assert_eq!(items.len(), 3);
//!
//! let format = CurrencyFormat::default();
//! assert_eq!(format.format_amount(Money::from_cents(1100)), "$11.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod carousel;
pub mod error;
pub mod form;
pub mod media;
pub mod money;
pub mod timer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use carousel::{
    CarouselConfig, CarouselEffect, CarouselState, CarouselStatus, Direction, MediaCarousel,
    MediaSlot, OverlayTarget, PlaybackRequest,
};
pub use error::{CoreError, CoreResult, PlaybackError, ValidationError};
pub use form::{DraftCartItem, FormStatus, OptionSelectionForm, SubmitOutcome};
pub use media::{MediaItem, MediaKind};
pub use money::{CurrencyFormat, CurrencyFormatter, Money};
pub use timer::{TimerKind, TimerSlot, TimerToken};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single configured item.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Largest accepted magnitude of a base or option price, in cents ($1,000,000).
///
/// Keeps `(base + Σ options) × MAX_ITEM_QUANTITY` far inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
