//! # Memory Catalog
//!
//! A fixed, in-memory product source for tests and demos.

use std::collections::HashMap;

use storefront_core::Product;

use crate::error::{CatalogError, CatalogResult};
use crate::repository::ProductSource;

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: Vec<Product>,
    collections: HashMap<String, Vec<Product>>,
}

impl MemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        MemoryCatalog {
            products,
            collections: HashMap::new(),
        }
    }

    /// Adds a named collection.
    pub fn with_collection(mut self, collection_id: impl Into<String>, products: Vec<Product>) -> Self {
        self.collections.insert(collection_id.into(), products);
        self
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductSource for MemoryCatalog {
    async fn list(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn list_collection(&self, collection_id: &str) -> CatalogResult<Vec<Product>> {
        self.collections
            .get(collection_id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("Collection", collection_id))
    }
}
