//! # JSON Catalog
//!
//! Reads products from JSON files under a catalog root.
//!
//! ## Layout
//! ```text
//! <root>/
//! ├── products.json          ← list()
//! └── collections/
//!     ├── mock.json          ← list_collection("mock")
//!     └── summer-menu.json   ← list_collection("summer-menu")
//! ```
//!
//! Each file holds a JSON array of products. A product that fails
//! validation is skipped with a warning so one bad entry doesn't hide the
//! rest of the menu.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use storefront_core::validation::{validate_collection_id, validate_product};
use storefront_core::Product;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::repository::ProductSource;

/// File name of the default product list.
pub const PRODUCTS_FILE: &str = "products.json";

/// Directory holding named collections.
pub const COLLECTIONS_DIR: &str = "collections";

/// Product source backed by JSON files.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = JsonCatalog::new("./catalog");
///
/// let products = catalog.list().await?;
/// let mock = catalog.list_collection("mock").await?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    root: PathBuf,
}

impl JsonCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonCatalog { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn products_path(&self) -> PathBuf {
        self.root.join(PRODUCTS_FILE)
    }

    /// Path of a collection file. The id must already be validated.
    pub fn collection_path(&self, collection_id: &str) -> PathBuf {
        self.root
            .join(COLLECTIONS_DIR)
            .join(format!("{collection_id}.json"))
    }

    /// Writes the default product list, creating the root if needed.
    pub async fn write_products(&self, products: &[Product]) -> CatalogResult<PathBuf> {
        let path = self.products_path();
        write_json(&path, products).await?;
        Ok(path)
    }

    /// Writes a named collection.
    pub async fn write_collection(
        &self,
        collection_id: &str,
        products: &[Product],
    ) -> CatalogResult<PathBuf> {
        validate_collection_id(collection_id)?;
        let path = self.collection_path(collection_id);
        write_json(&path, products).await?;
        Ok(path)
    }

    async fn read_products(&self, path: &Path, entity: &str, id: &str) -> CatalogResult<Vec<Product>> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Err(CatalogError::not_found(entity, id));
            }
            Err(source) => {
                return Err(CatalogError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let products = parse_products(&raw, path)?;
        debug!(path = %path.display(), count = products.len(), "Catalog file loaded");
        Ok(products)
    }
}

impl ProductSource for JsonCatalog {
    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let path = self.products_path();
        let id = path.display().to_string();
        self.read_products(&path, "Catalog", &id).await
    }

    async fn list_collection(&self, collection_id: &str) -> CatalogResult<Vec<Product>> {
        validate_collection_id(collection_id)?;
        let path = self.collection_path(collection_id);
        self.read_products(&path, "Collection", collection_id).await
    }
}

/// Parses a product array and drops entries that fail validation.
pub fn parse_products(raw: &str, path: &Path) -> CatalogResult<Vec<Product>> {
    let products: Vec<Product> =
        serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let total = products.len();
    let valid: Vec<Product> = products
        .into_iter()
        .filter(|product| match validate_product(product) {
            Ok(()) => true,
            Err(error) => {
                warn!(product_id = %product.id, %error, "Skipping invalid product");
                false
            }
        })
        .collect();

    if valid.len() < total {
        info!(
            path = %path.display(),
            skipped = total - valid.len(),
            "Catalog loaded with invalid products skipped"
        );
    }
    Ok(valid)
}

async fn write_json(path: &Path, products: &[Product]) -> CatalogResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| CatalogError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let json = serde_json::to_string_pretty(products).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tokio::fs::write(path, json)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_products;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("storefront-catalog-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_write_then_list() {
        let root = temp_root();
        let catalog = JsonCatalog::new(&root);
        let products = sample_products();

        catalog.write_products(&products).await.unwrap();
        let loaded = catalog.list().await.unwrap();
        assert_eq!(loaded, products);

        let first = catalog.get_by_id(&products[0].id).await.unwrap();
        assert_eq!(first.title, products[0].title);

        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn test_collections() {
        let root = temp_root();
        let catalog = JsonCatalog::new(&root);
        let products = sample_products();

        catalog.write_collection("mock", &products[..1]).await.unwrap();
        assert_eq!(catalog.list_collection("mock").await.unwrap().len(), 1);

        let missing = catalog.list_collection("winter").await;
        assert!(matches!(missing, Err(CatalogError::NotFound { .. })));

        let unsafe_id = catalog.list_collection("../products").await;
        assert!(matches!(unsafe_id, Err(CatalogError::Validation(_))));

        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn test_missing_root_is_not_found() {
        let catalog = JsonCatalog::new(temp_root());
        assert!(matches!(
            catalog.list().await,
            Err(CatalogError::NotFound { .. })
        ));
        assert!(matches!(
            catalog.get_by_id("pizza").await,
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_products_are_skipped() {
        let raw = r#"[
            {"id": "ok", "title": "Fine", "price": 500},
            {"id": "", "title": "No id", "price": 500},
            {"id": "dup", "title": "Dup", "price": 500, "options": {
                "Size": [
                    {"id": "m", "title": "M", "category": "Size"},
                    {"id": "m", "title": "M again", "category": "Size"}
                ]
            }}
        ]"#;

        let products = parse_products(raw, Path::new("products.json")).unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["ok"]);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let err = parse_products("{not json", Path::new("products.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("products.json"));
    }
}
