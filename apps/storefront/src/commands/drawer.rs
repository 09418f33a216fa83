//! # Drawer Commands
//!
//! The cart item drawer boundary: open a product, pick options, submit.
//!
//! ## Drawer Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Click product ──► open_drawer(id) ──► fresh form + carousel started    │
//! │                                                                         │
//! │  Click option ───► select_option(category, option) ──► total updates    │
//! │                                                                         │
//! │  Add to cart ────► submit_drawer()                                      │
//! │                      ├── every category chosen ──► line added to cart,  │
//! │                      │                              drawer closed       │
//! │                      └── categories missing ─────► "Select an option"   │
//! │                                                     under each one      │
//! │                                                                         │
//! │  Dismiss ────────► close_drawer() ──► carousel torn down                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_catalog::ProductSource;
use storefront_core::carousel::CarouselView;
use storefront_core::form::FormView;
use storefront_core::{CartItem, CoreError, OptionSelectionForm, MAX_CART_ITEMS};
use tracing::{debug, info};

use crate::config::StorefrontConfig;
use crate::error::{ApiResult, ErrorCode};
use crate::state::{CartResponse, CartState, CatalogState, DrawerState, Submission};

/// Everything the drawer renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerResponse {
    pub form: FormView,
    /// Absent when the product has no media.
    pub media: Option<CarouselView>,
}

/// Result of [`submit_drawer`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitResponse {
    /// The item is in the cart and the drawer is closed.
    Added { item: CartItem, cart: CartResponse },
    /// Nothing was added; the form flags the missing categories.
    Incomplete {
        missing: Vec<String>,
        form: FormView,
    },
}

/// Opens the drawer for a product, replacing any open drawer.
///
/// ## Arguments
/// * `product_id` - Product in the current listing
/// * `quantity` - Units to configure (default: 1)
pub async fn open_drawer<S: ProductSource>(
    catalog: &CatalogState<S>,
    drawer: &DrawerState,
    config: &StorefrontConfig,
    product_id: &str,
    quantity: Option<u32>,
) -> ApiResult<DrawerResponse> {
    debug!(product_id = %product_id, ?quantity, "open_drawer command");

    let product = catalog.get(product_id)?;
    let form = OptionSelectionForm::with_quantity(product, quantity.unwrap_or(1))?;
    drawer.open(form, config.carousel_config()).await;

    drawer_view(drawer, config).await
}

/// Current render model of the open drawer.
pub async fn drawer_view(
    drawer: &DrawerState,
    config: &StorefrontConfig,
) -> ApiResult<DrawerResponse> {
    let formatter = config.currency_format();
    let form = drawer.with_form(|form| form.view(&formatter))?;

    let media = match drawer.carousel() {
        Ok(handle) => Some(handle.view().await?),
        Err(e) if e.code == ErrorCode::MediaError => None,
        Err(e) => return Err(e),
    };

    Ok(DrawerResponse { form, media })
}

/// Chooses an option, replacing the previous choice of its category.
///
/// ## Errors
/// - `DRAWER_ERROR` if no drawer is open or it was already submitted
/// - `VALIDATION_ERROR` if the product has no such category or option
pub fn select_option(
    drawer: &DrawerState,
    config: &StorefrontConfig,
    category: &str,
    option_id: &str,
) -> ApiResult<FormView> {
    debug!(category = %category, option_id = %option_id, "select_option command");

    let formatter = config.currency_format();
    let view = drawer.with_form(|form| {
        form.select_by_id(category, option_id)?;
        Ok::<FormView, CoreError>(form.view(&formatter))
    })??;
    Ok(view)
}

/// Validates the form and, when complete, adds the item to the cart.
///
/// An incomplete form is not an error: the response lists the missing
/// categories and the drawer stays open.
pub async fn submit_drawer(
    drawer: &DrawerState,
    cart: &CartState,
    config: &StorefrontConfig,
) -> ApiResult<SubmitResponse> {
    debug!("submit_drawer command");

    // Check before the form is consumed.
    if cart.with_cart(|c| c.item_count() >= MAX_CART_ITEMS) {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        }
        .into());
    }

    let submission = drawer
        .submit(|item| {
            let response = cart.with_cart_mut(|c| {
                c.add_item(item.clone())?;
                Ok::<CartResponse, CoreError>(CartResponse::from(&*c))
            })?;
            Ok((item, response))
        })
        .await?;

    match submission {
        Submission::Committed((item, response)) => {
            info!(
                line_id = %item.id,
                product_id = %item.product.id,
                cart_lines = response.totals.item_count,
                "Item added to cart"
            );
            Ok(SubmitResponse::Added {
                item,
                cart: response,
            })
        }
        Submission::Incomplete(missing) => {
            let formatter = config.currency_format();
            let form = drawer.with_form(|form| form.view(&formatter))?;
            Ok(SubmitResponse::Incomplete { missing, form })
        }
    }
}

/// Closes the drawer without adding anything.
///
/// ## Returns
/// Whether a drawer was open
pub async fn close_drawer(drawer: &DrawerState) -> bool {
    debug!("close_drawer command");
    drawer.close().await
}
