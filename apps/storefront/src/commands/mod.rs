//! # Commands Module
//!
//! Every operation the storefront UI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Listing, lookup, catalog reload
//! ├── drawer.rs   ◄─── Open / select / submit / close the cart item drawer
//! ├── media.rs    ◄─── Carousel navigation, video, maximize
//! └── cart.rs     ◄─── Cart inspection and removal
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_products(catalog: &CatalogState<S>, config: &StorefrontConfig)
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartState)
//!
//! // Needs both drawer and cart
//! async fn submit_drawer(drawer: &DrawerState, cart: &CartState, config: &StorefrontConfig)
//! ```
//!
//! Commands return `Result<T, ApiError>`; the error serializes to
//! `{ "code": "...", "message": "..." }`.

pub mod cart;
pub mod drawer;
pub mod media;
pub mod product;
