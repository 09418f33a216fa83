//! # Validation Module
//!
//! Business rule validation for catalog data and drawer input.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Shape and types of products.json                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog load                                                 │
//! │  └── validate_product: malformed products are skipped with a warning   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Commands                                                     │
//! │  ├── validate_quantity before opening a drawer                         │
//! │  ├── validate_cart_size before adding a line                           │
//! │  └── validate_collection_id before touching the filesystem             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_collection_id, validate_quantity};
//!
//! assert!(validate_quantity(2).is_ok());
//! assert!(validate_collection_id("summer-menu").is_ok());
//! assert!(validate_collection_id("../etc").is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::Product;
use crate::money::Money;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a product title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a collection identifier.
pub const MAX_COLLECTION_ID_LEN: usize = 64;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product loaded from the catalog.
///
/// ## Rules
/// - `id` and `title` must not be blank; `title` at most 200 characters
/// - base price must not be negative (option prices may be)
/// - base and option prices at most MAX_PRICE_CENTS in magnitude
/// - category titles must not be blank and must be unique
/// - every category offers at least one option
/// - every option's `category` matches the group it is listed under
/// - option ids are unique within their category
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    validate_title(&product.title)?;

    if product.price.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    validate_price_bound("price", product.price)?;

    let mut seen_categories = HashSet::new();
    for category in product.categories() {
        if category.title.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "category title".to_string(),
            });
        }

        if !seen_categories.insert(category.title.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "category".to_string(),
                value: category.title.clone(),
            });
        }

        if category.options.is_empty() {
            return Err(ValidationError::Required {
                field: format!("options of '{}'", category.title),
            });
        }

        let mut seen_options = HashSet::new();
        for option in &category.options {
            if option.category != category.title {
                return Err(ValidationError::InvalidFormat {
                    field: format!("option '{}'", option.id),
                    reason: format!(
                        "belongs to '{}' but is listed under '{}'",
                        option.category, category.title
                    ),
                });
            }

            validate_price_bound(&format!("price of option '{}'", option.id), option.price)?;

            if !seen_options.insert(option.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "option id".to_string(),
                    value: option.id.clone(),
                });
            }
        }
    }

    Ok(())
}

fn validate_price_bound(field: &str, price: Money) -> ValidationResult<()> {
    if !(-MAX_PRICE_CENTS..=MAX_PRICE_CENTS).contains(&price.cents()) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: -MAX_PRICE_CENTS,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a product title.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates the quantity of a configured item.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 || quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates cart size before adding another line.
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

/// Validates a collection identifier.
///
/// The id becomes a file name, so only letters, digits, hyphens and
/// underscores are accepted.
pub fn validate_collection_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "collection id".to_string(),
        });
    }

    if id.len() > MAX_COLLECTION_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "collection id".to_string(),
            max: MAX_COLLECTION_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "collection id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
