//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Drawer / form misuse, unknown options          │
//! │  ├── ValidationError  - Product data and input validation failures     │
//! │  └── PlaybackError    - Video play() rejections (logged, never raised) │
//! │                                                                         │
//! │  storefront-catalog errors (separate crate)                            │
//! │  └── CatalogError     - Product file loading failures                  │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What command callers see (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing category on submit is NOT an error: it is an ordinary
//! [`SubmitOutcome::Incomplete`](crate::form::SubmitOutcome) result.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core interaction errors.
///
/// These represent requests the current state cannot honour. They are
/// recoverable and never leave the drawer in a half-updated state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The product has no option category with this title.
    #[error("Product {product_id} has no option category '{category}'")]
    UnknownCategory {
        product_id: String,
        category: String,
    },

    /// The category exists but does not contain the requested option.
    ///
    /// ## When This Occurs
    /// - An option from another product is passed to the form
    /// - A stale option id is sent after the catalog was reloaded
    #[error("Option '{option_id}' is not available in category '{category}'")]
    OptionNotFound { category: String, option_id: String },

    /// The form was already submitted and accepts no further changes.
    #[error("The cart item form has already been submitted")]
    FormClosed,

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Cart line cannot be found.
    #[error("Cart item not found: {0}")]
    CartItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used when product data or user input doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate option id in a category).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Playback Error
// =============================================================================

/// Failure of a video `play()` request.
///
/// The carousel logs these and reflects "not playing"; they are never
/// propagated to the drawer or the product list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Autoplay policy refused to start playback.
    #[error("autoplay was prevented: {0}")]
    AutoplayBlocked(String),

    /// The media could not be loaded or decoded.
    #[error("media failed to play: {0}")]
    Failed(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
