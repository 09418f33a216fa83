//! # storefront-catalog: Product Listing Provider
//!
//! This crate provides the products shown by the storefront.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  Command (list_products / reload_catalog)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                storefront-catalog (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ ProductSource │    │  Providers    │    │    Seed      │  │   │
//! │  │   │   (trait)     │◄───│ JsonCatalog   │    │ sample menu  │  │   │
//! │  │   │               │    │ MemoryCatalog │    │ seed binary  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  <catalog root>/products.json, <catalog root>/collections/*.json │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`repository`] - The `ProductSource` trait and its providers
//! - [`seed`] - Sample catalog data
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_catalog::{JsonCatalog, ProductSource};
//!
//! let catalog = JsonCatalog::new("./catalog");
//! let products = catalog.list().await?;
//! let mock = catalog.list_collection("mock").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use repository::{JsonCatalog, MemoryCatalog, ProductSource};
