//! MySQL implementation of [`OrderItemDao`].

use crate::{dao::OrderItemDao, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{CatalogResult, ProductId, ProductSales};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

// SUM over INT yields DECIMAL in MySQL; cast so it decodes as BIGINT.
const TOP_SELLERS_IN_AREA: &str = r"
    SELECT oi.product_id AS product_id,
           CAST(SUM(oi.quantity) AS SIGNED) AS total_quantity
    FROM order_items oi
    INNER JOIN products p ON p.id = oi.product_id
    WHERE p.area = ?
    GROUP BY oi.product_id
    ORDER BY total_quantity DESC
    LIMIT ?
";

/// MySQL-backed order item DAO.
#[derive(Component, Clone)]
#[shaku(interface = OrderItemDao)]
pub struct MySqlOrderItemDaoImpl {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlOrderItemDaoImpl {
    /// Creates a new MySQL order item DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductSalesRow {
    product_id: i64,
    total_quantity: Option<i64>,
}

impl From<ProductSalesRow> for ProductSales {
    fn from(row: ProductSalesRow) -> Self {
        Self::new(ProductId::new(row.product_id), row.total_quantity)
    }
}

#[async_trait]
impl OrderItemDao for MySqlOrderItemDaoImpl {
    async fn sum_quantity_by_product_in_area(
        &self,
        area: &str,
        limit: u32,
    ) -> CatalogResult<Vec<ProductSales>> {
        debug!("Aggregating order quantities for area: {}", area);

        let rows = sqlx::query_as::<_, ProductSalesRow>(TOP_SELLERS_IN_AREA)
            .bind(area)
            .bind(limit)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(ProductSales::from).collect())
    }
}

impl std::fmt::Debug for MySqlOrderItemDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlOrderItemDaoImpl").finish_non_exhaustive()
    }
}
