//! Product service trait.

use crate::dto::{CreateProductRequest, ProductResponse, TopProductResponse};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, ListingFilter, ProductId};

/// Catalog operations exposed to the transport layer.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Stores a product and announces it. Notification failures are logged,
    /// never returned.
    async fn create_product(&self, request: CreateProductRequest) -> CatalogResult<ProductResponse>;

    /// Lists products matching the filter through the cache.
    async fn list_products(&self, filter: ListingFilter) -> CatalogResult<Vec<ProductResponse>>;

    /// Gets a product by ID, bypassing the cache.
    async fn get_product(&self, id: ProductId) -> CatalogResult<Option<ProductResponse>>;

    /// Returns the best sellers of an area through the cache.
    async fn top_products(&self, area: &str) -> CatalogResult<Vec<TopProductResponse>>;
}
