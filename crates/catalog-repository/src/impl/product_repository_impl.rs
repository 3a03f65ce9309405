//! `ProductRepositoryImpl`: repository layer implementation.
//!
//! Implements the [`ProductRepository`] interface by coordinating the
//! product and order item DAOs:
//!
//! ```text
//! Service
//!   ↓ Arc<dyn ProductRepository>
//! ProductRepositoryImpl              ← coordinates DAOs, wraps write failures
//!   ↓ Arc<dyn ProductDao> / Arc<dyn OrderItemDao>
//! MySqlProductDaoImpl / MySqlOrderItemDaoImpl
//!   ↓
//! MySQL
//! ```
//!
//! [`ProductRepository`]: crate::traits::ProductRepository

use crate::{
    dao::{OrderItemDao, ProductDao},
    traits::ProductRepository,
};
use async_trait::async_trait;
use catalog_core::{
    CatalogError, CatalogResult, NewProduct, Product, ProductId, ProductQuery, ProductSales,
};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, error};

/// Message returned to callers when an insert fails.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create product";

/// Repository implementation that orchestrates DAO access.
#[derive(Component)]
#[shaku(interface = ProductRepository)]
pub struct ProductRepositoryImpl {
    #[shaku(inject)]
    product_dao: Arc<dyn ProductDao>,

    #[shaku(inject)]
    order_item_dao: Arc<dyn OrderItemDao>,
}

impl ProductRepositoryImpl {
    /// Creates a new `ProductRepositoryImpl` with the given DAOs.
    #[must_use]
    pub fn new(product_dao: Arc<dyn ProductDao>, order_item_dao: Arc<dyn OrderItemDao>) -> Self {
        Self {
            product_dao,
            order_item_dao,
        }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn find_many(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>> {
        debug!("Repository: find_many {:?}", query);
        self.product_dao.find_many(query).await
    }

    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        debug!("Repository: find_by_id {}", id);
        self.product_dao.find_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<Product>> {
        debug!("Repository: find_by_ids ({} ids)", ids.len());
        self.product_dao.find_by_ids(ids).await
    }

    async fn top_sellers_in_area(&self, area: &str, limit: u32) -> CatalogResult<Vec<ProductSales>> {
        debug!("Repository: top_sellers_in_area {} limit={}", area, limit);
        self.order_item_dao
            .sum_quantity_by_product_in_area(area, limit)
            .await
    }

    async fn create(&self, product: &NewProduct) -> CatalogResult<Product> {
        debug!("Repository: create product {}", product.name);
        self.product_dao.insert(product).await.map_err(|e| {
            error!("Error creating product {}: {}", product.name, e);
            CatalogError::BadRequest(CREATE_FAILED_MESSAGE.to_string())
        })
    }
}

impl std::fmt::Debug for ProductRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductRepositoryImpl").finish_non_exhaustive()
    }
}
