//! # Product Commands
//!
//! Listing and lookup against the loaded catalog snapshot.

use serde::Serialize;
use storefront_catalog::ProductSource;
use storefront_core::{CurrencyFormatter, MediaItem, Money, Product};
use tracing::{debug, info};

use crate::config::StorefrontConfig;
use crate::error::ApiResult;
use crate::state::CatalogState;

/// Product as shown in the listing.
///
/// Options are left out; the drawer fetches them when it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: Money,
    /// Price formatted with the store currency.
    pub price_label: String,
    pub has_options: bool,
    pub media: Vec<MediaItem>,
}

impl ProductDto {
    pub fn new(product: &Product, formatter: &impl CurrencyFormatter) -> Self {
        ProductDto {
            id: product.id.clone(),
            title: product.title.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price(),
            price_label: formatter.format(product.price()),
            has_options: product.has_options(),
            media: product.media(),
        }
    }
}

/// Lists the products of the current snapshot in catalog order.
pub fn list_products<S: ProductSource>(
    catalog: &CatalogState<S>,
    config: &StorefrontConfig,
) -> Vec<ProductDto> {
    let formatter = config.currency_format();
    let products: Vec<ProductDto> = catalog
        .products()
        .iter()
        .map(|p| ProductDto::new(p, &formatter))
        .collect();

    debug!(count = products.len(), "list_products command");
    products
}

/// Gets a single product, options included.
///
/// ## Returns
/// The product if found, or `NOT_FOUND`
pub fn get_product<S: ProductSource>(catalog: &CatalogState<S>, id: &str) -> ApiResult<Product> {
    debug!(id = %id, "get_product command");
    Ok(catalog.get(id)?)
}

/// Reloads the listing from the product source.
///
/// Open drawers and cart lines keep the products they copied.
///
/// ## Returns
/// Number of products now listed
pub async fn reload_catalog<S: ProductSource>(catalog: &CatalogState<S>) -> ApiResult<usize> {
    let count = catalog.load().await?;
    info!(count, "reload_catalog command");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_catalog::seed::sample_products;
    use storefront_catalog::MemoryCatalog;

    async fn loaded() -> CatalogState<MemoryCatalog> {
        let state = CatalogState::new(MemoryCatalog::new(sample_products()), None);
        state.load().await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_list_products_formats_prices() {
        let catalog = loaded().await;
        let products = list_products(&catalog, &StorefrontConfig::default());

        let pizza = products.iter().find(|p| p.id == "margherita").unwrap();
        assert_eq!(pizza.price_label, "$10.00");
        assert!(pizza.has_options);
        assert_eq!(pizza.media.len(), 3);

        let lemonade = products.iter().find(|p| p.id == "lemonade").unwrap();
        assert!(!lemonade.has_options);
    }

    #[tokio::test]
    async fn test_get_product() {
        let catalog = loaded().await;
        let product = get_product(&catalog, "margherita").unwrap();
        assert_eq!(product.categories().len(), 2);

        let err = get_product(&catalog, "calzone").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: calzone");
    }

    #[tokio::test]
    async fn test_reload_catalog() {
        let catalog = CatalogState::new(MemoryCatalog::new(sample_products()), None);
        assert!(list_products(&catalog, &StorefrontConfig::default()).is_empty());

        let count = reload_catalog(&catalog).await.unwrap();
        assert_eq!(count, sample_products().len());
    }
}
