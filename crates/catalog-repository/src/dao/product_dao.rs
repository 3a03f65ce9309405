//! `ProductDao` trait: low-level access to the `products` table.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, NewProduct, Product, ProductId, ProductQuery};

/// Low-level product data access object.
///
/// Use [`crate::ProductRepositoryImpl`] to coordinate DAOs.
#[async_trait]
pub trait ProductDao: Interface + Send + Sync {
    /// Lists products matching the query.
    async fn find_many(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>>;

    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Finds every product whose id is listed.
    async fn find_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<Product>>;

    /// Persists a new product.
    async fn insert(&self, product: &NewProduct) -> CatalogResult<Product>;
}
