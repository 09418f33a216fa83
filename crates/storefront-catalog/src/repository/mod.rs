//! # Repository Module
//!
//! Product listing providers.
//!
//! ## Provider Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Command (list_products)                                               │
//! │       │                                                                 │
//! │       │  catalog.list().await                                          │
//! │       ▼                                                                 │
//! │  ProductSource (trait)                                                 │
//! │  ├── list(&self)                                                       │
//! │  ├── list_collection(&self, id)                                        │
//! │  └── get_by_id(&self, id)            (default: scan of list())         │
//! │       │                                                                 │
//! │       ├──► JsonCatalog    <root>/products.json, <root>/collections/    │
//! │       └──► MemoryCatalog  fixed in-memory lists (tests, demos)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Providers
//!
//! - [`JsonCatalog`] - Product files on disk
//! - [`MemoryCatalog`] - In-memory product lists

pub mod json;
pub mod memory;

use std::future::Future;

use storefront_core::Product;

use crate::error::{CatalogError, CatalogResult};

pub use json::JsonCatalog;
pub use memory::MemoryCatalog;

/// A read-only source of products.
///
/// Implementations are shared between tasks, so the returned futures must be
/// `Send`.
pub trait ProductSource: Send + Sync {
    /// The default product list.
    fn list(&self) -> impl Future<Output = CatalogResult<Vec<Product>>> + Send;

    /// A named product list (e.g. `"mock"`).
    fn list_collection(
        &self,
        collection_id: &str,
    ) -> impl Future<Output = CatalogResult<Vec<Product>>> + Send;

    /// Looks a product up in the default list.
    fn get_by_id(&self, id: &str) -> impl Future<Output = CatalogResult<Product>> + Send {
        async move {
            self.list()
                .await?
                .into_iter()
                .find(|p| p.id == id)
                .ok_or_else(|| CatalogError::not_found("Product", id))
        }
    }
}
