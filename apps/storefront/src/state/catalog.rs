//! # Catalog State
//!
//! The product listing currently on screen, loaded from a [`ProductSource`].
//!
//! The listing is a snapshot: drawers and cart lines copy products out of
//! it, so a reload never changes an open drawer or a cart price.

use std::sync::{PoisonError, RwLock};

use storefront_catalog::{CatalogError, CatalogResult, ProductSource};
use storefront_core::Product;
use tracing::info;

pub struct CatalogState<S> {
    source: S,
    /// Named collection to list instead of the default list.
    collection: Option<String>,
    products: RwLock<Vec<Product>>,
}

impl<S: ProductSource> CatalogState<S> {
    /// Creates an empty state. Call [`CatalogState::load`] to fill it.
    pub fn new(source: S, collection: Option<String>) -> Self {
        CatalogState {
            source,
            collection,
            products: RwLock::new(Vec::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// Fetches the listing from the source and replaces the snapshot.
    ///
    /// On error the previous snapshot is kept.
    pub async fn load(&self) -> CatalogResult<usize> {
        let products = match self.collection.as_deref() {
            Some(id) => self.source.list_collection(id).await?,
            None => self.source.list().await?,
        };

        let count = products.len();
        *self
            .products
            .write()
            .unwrap_or_else(PoisonError::into_inner) = products;

        info!(count, collection = ?self.collection, "Catalog loaded");
        Ok(count)
    }

    /// The current snapshot, in catalog order.
    pub fn products(&self) -> Vec<Product> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Looks a product up in the current snapshot.
    pub fn get(&self, id: &str) -> CatalogResult<Product> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("Product", id))
    }
}
