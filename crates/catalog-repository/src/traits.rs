//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, NewProduct, Product, ProductId, ProductQuery, ProductSales};

/// Product store used by the catalog service.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Returns products matching the query, ordered by id.
    async fn find_many(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>>;

    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Fetches all products whose id is in `ids`, in one round trip.
    async fn find_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<Product>>;

    /// Sums ordered quantities per product for products in `area`,
    /// largest sum first, at most `limit` groups.
    async fn top_sellers_in_area(&self, area: &str, limit: u32) -> CatalogResult<Vec<ProductSales>>;

    /// Inserts a product and returns it with its assigned id.
    ///
    /// Any store failure surfaces as `CatalogError::BadRequest`.
    async fn create(&self, product: &NewProduct) -> CatalogResult<Product>;
}
