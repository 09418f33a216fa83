//! # Application Error Types
//!
//! Errors of the application layer and the serializable error type that
//! commands return.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, ApiError>                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Catalog Error? ─── CatalogError::NotFound ────────┐                   │
//! │         │                                          │                   │
//! │         ▼                                          ▼                   │
//! │  Form Error? ────── CoreError::OptionNotFound ── ApiError ───► caller  │
//! │         │                                          ▲                   │
//! │         ▼                                          │                   │
//! │  Carousel gone? ─── AppError::CarouselStopped ─────┘                   │
//! │                                                                         │
//! │  Callers switch on `code`, show `message`:                             │
//! │  { "code": "NOT_FOUND", "message": "Product not found: pizza" }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use storefront_catalog::CatalogError;
use storefront_core::{CoreError, ValidationError};
use thiserror::Error;

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML of the expected shape.
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its allowed range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// App Error
// =============================================================================

/// Errors surfaced by the application layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// The carousel actor has shut down; its handle is stale.
    #[error("Carousel is no longer running")]
    CarouselStopped,

    /// Reading commands or writing replies failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: margherita"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Catalog files could not be read
    CatalogError,

    /// The drawer is closed or was already submitted
    DrawerError,

    /// Cart operation failed
    CartError,

    /// The media carousel is unavailable
    MediaError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// No drawer is open, or the request names a different product.
    pub fn drawer_closed() -> Self {
        ApiError::new(ErrorCode::DrawerError, "No cart item drawer is open")
    }

    /// The open product has no media to show.
    pub fn no_media() -> Self {
        ApiError::new(ErrorCode::MediaError, "This product has no media")
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::CartItemNotFound(id) => ApiError::not_found("Cart item", &id),
            CoreError::UnknownCategory { .. } | CoreError::OptionNotFound { .. } => {
                ApiError::validation(err.to_string())
            }
            CoreError::FormClosed => ApiError::new(ErrorCode::DrawerError, err.to_string()),
            CoreError::CartTooLarge { .. } => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            CatalogError::Validation(e) => ApiError::validation(e.to_string()),
            CatalogError::Io { .. } | CatalogError::Parse { .. } => {
                // Log the path and cause, return a generic message
                tracing::error!(error = %err, "Catalog could not be loaded");
                ApiError::new(ErrorCode::CatalogError, "Product catalog is unavailable")
            }
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Core(e) => e.into(),
            AppError::Catalog(e) => e.into(),
            AppError::CarouselStopped => ApiError::new(ErrorCode::MediaError, err.to_string()),
            AppError::Io(e) => {
                tracing::error!(error = %e, "Terminal I/O error");
                ApiError::internal("Terminal I/O error")
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "Configuration error");
                ApiError::internal("Configuration error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;
