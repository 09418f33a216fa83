//! # Product List Renderer
//!
//! Text rendering of the product listing. The list knows nothing about the
//! drawer; finished cart items reach it through `on_add`.
//!
//! ```text
//! Margherita ................................ $10.00  [options]
//!   Tomato, mozzarella, basil
//! Lemonade .................................. $3.50
//! ```

use std::fmt::Write;

use storefront_core::{CartItem, CurrencyFormatter, Product};

/// Width of the title + leader column.
const LINE_WIDTH: usize = 44;

/// A listing of products plus the callback that receives configured items.
pub struct ProductList<F>
where
    F: FnMut(CartItem),
{
    products: Vec<Product>,
    on_add: F,
}

impl<F> ProductList<F>
where
    F: FnMut(CartItem),
{
    pub fn new(products: Vec<Product>, on_add: F) -> Self {
        ProductList { products, on_add }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Hands a finalized item to the owner of the list.
    pub fn add(&mut self, item: CartItem) {
        (self.on_add)(item);
    }

    /// Renders one block per product, in catalog order.
    pub fn render(&self, formatter: &impl CurrencyFormatter) -> String {
        if self.products.is_empty() {
            return String::from("No products available.\n");
        }

        let mut out = String::new();
        for product in &self.products {
            let price = formatter.format(product.price());
            let leader_len = LINE_WIDTH.saturating_sub(product.title.chars().count() + 1);
            let _ = write!(
                out,
                "{} {} {}",
                product.title,
                ".".repeat(leader_len.max(3)),
                price
            );
            if product.has_options() {
                out.push_str("  [options]");
            }
            out.push('\n');

            if !product.description.is_empty() {
                let _ = writeln!(out, "  {}", product.description);
            }
        }
        out
    }
}
