//! # Cart Commands
//!
//! Items enter the cart through `submit_drawer`; these commands inspect and
//! trim it.

use tracing::debug;

use crate::error::ApiResult;
use crate::state::{CartResponse, CartState};

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and calculated totals
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Removes a line from the cart.
///
/// ## Arguments
/// * `line_id` - Id of the cart line (not the product id)
pub fn remove_from_cart(cart: &CartState, line_id: &str) -> ApiResult<CartResponse> {
    debug!(line_id = %line_id, "remove_from_cart command");

    let response = cart.with_cart_mut(|c| {
        c.remove_item(line_id)?;
        Ok::<CartResponse, storefront_core::CoreError>(CartResponse::from(&*c))
    })?;
    Ok(response)
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}
