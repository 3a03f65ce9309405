//! MySQL implementation of [`ProductDao`].

use crate::{dao::ProductDao, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, NewProduct, Product, ProductId, ProductQuery};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

const SELECT_PRODUCTS: &str = "SELECT id, name, area, category FROM products";

/// MySQL-backed product DAO.
#[derive(Component, Clone)]
#[shaku(interface = ProductDao)]
pub struct MySqlProductDaoImpl {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlProductDaoImpl {
    /// Creates a new MySQL product DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    area: String,
    category: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            area: row.area,
            category: row.category,
        }
    }
}

/// Builds the listing statement.
///
/// The cursor and the offset are applied together: rows after the cursor
/// id, then `skip` of those are dropped.
fn listing_query(query: &ProductQuery) -> QueryBuilder<'static, MySql> {
    let mut builder = QueryBuilder::new(SELECT_PRODUCTS);
    builder.push(" WHERE 1 = 1");

    if query.has_category_filter() {
        builder.push(" AND category IN (");
        let mut categories = builder.separated(", ");
        for category in &query.categories {
            categories.push_bind(category.clone());
        }
        categories.push_unseparated(")");
    }

    if let Some(cursor) = query.cursor {
        builder.push(" AND id > ").push_bind(cursor);
    }

    builder
        .push(" ORDER BY id ASC LIMIT ")
        .push_bind(query.take)
        .push(" OFFSET ")
        .push_bind(query.skip);
    builder
}

fn by_ids_query(ids: &[ProductId]) -> QueryBuilder<'static, MySql> {
    let mut builder = QueryBuilder::new(SELECT_PRODUCTS);
    builder.push(" WHERE id IN (");
    let mut list = builder.separated(", ");
    for id in ids {
        list.push_bind(id.into_inner());
    }
    list.push_unseparated(")");
    builder
}

#[async_trait]
impl ProductDao for MySqlProductDaoImpl {
    async fn find_many(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>> {
        debug!(
            "Finding products: categories={:?}, skip={}, take={}, cursor={:?}",
            query.categories, query.skip, query.take, query.cursor
        );

        let rows = listing_query(query)
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, area, category FROM products WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Finding {} products by id", ids.len());

        let rows = by_ids_query(ids)
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn insert(&self, product: &NewProduct) -> CatalogResult<Product> {
        debug!("Inserting product: {}", product.name);

        let result = sqlx::query("INSERT INTO products (name, area, category) VALUES (?, ?, ?)")
            .bind(&product.name)
            .bind(&product.area)
            .bind(&product.category)
            .execute(self.pool.inner())
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| CatalogError::Internal("Inserted id out of range".to_string()))?;

        Ok(product.clone().with_id(ProductId::new(id)))
    }
}

impl std::fmt::Debug for MySqlProductDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlProductDaoImpl").finish_non_exhaustive()
    }
}
