//! `OrderItemDao` trait: read-only aggregation over `order_items`.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, ProductSales};

/// Low-level order item data access object.
#[async_trait]
pub trait OrderItemDao: Interface + Send + Sync {
    /// Groups order items of products in `area` by product id, sums the
    /// quantities, and returns the `limit` largest sums in descending order.
    async fn sum_quantity_by_product_in_area(
        &self,
        area: &str,
        limit: u32,
    ) -> CatalogResult<Vec<ProductSales>>;
}
