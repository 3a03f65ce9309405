//! Integration tests for the MySQL-backed product repository.
//!
//! These tests run against a real MySQL database using testcontainers
//! and need Docker; run them with `cargo test -- --ignored`.

mod common;

use catalog_core::{NewProduct, ProductId, ProductQuery};
use catalog_repository::{
    DatabasePoolInterface, MySqlOrderItemDaoImpl, MySqlProductDaoImpl, ProductRepository,
    ProductRepositoryImpl,
};
use common::TestDatabase;
use std::sync::Arc;

fn repository(db: &TestDatabase) -> ProductRepositoryImpl {
    let pool: Arc<dyn DatabasePoolInterface> = db.pool();
    ProductRepositoryImpl::new(
        Arc::new(MySqlProductDaoImpl::new(Arc::clone(&pool))),
        Arc::new(MySqlOrderItemDaoImpl::new(pool)),
    )
}

async fn seed(repo: &ProductRepositoryImpl, rows: &[(&str, &str, &str)]) -> Vec<ProductId> {
    let mut ids = Vec::new();
    for (name, area, category) in rows {
        let created = repo
            .create(&NewProduct::new(*name, *area, *category))
            .await
            .expect("Failed to create product");
        ids.push(created.id);
    }
    ids
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);

    let created = repo
        .create(&NewProduct::new("Lamp", "north", "home"))
        .await
        .expect("Failed to create product");
    assert!(created.id.into_inner() > 0);

    let found = repo
        .find_by_id(created.id)
        .await
        .expect("Query failed")
        .expect("Product not found");
    assert_eq!(found, created);

    assert!(repo.find_by_id(ProductId::new(9999)).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_many_filters_and_paginates() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);
    let ids = seed(
        &repo,
        &[
            ("a", "north", "toys"),
            ("b", "north", "books"),
            ("c", "south", "toys"),
            ("d", "south", "toys"),
            ("e", "east", "garden"),
        ],
    )
    .await;

    let all = repo.find_many(&ProductQuery::default()).await.unwrap();
    assert_eq!(all.len(), 5);

    let toys = repo
        .find_many(&ProductQuery {
            categories: vec!["toys".into(), "garden".into()],
            ..ProductQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(toys.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), ["a", "c", "d", "e"]);

    // Cursor excludes ids up to and including it, skip then drops one more.
    let page = repo
        .find_many(&ProductQuery {
            categories: vec!["toys".into()],
            skip: 1,
            take: 10,
            cursor: Some(ids[0].into_inner()),
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "d");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_ids() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);
    let ids = seed(&repo, &[("a", "n", "x"), ("b", "n", "x"), ("c", "n", "x")]).await;

    let found = repo.find_by_ids(&[ids[0], ids[2]]).await.unwrap();
    assert_eq!(found.len(), 2);

    assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_top_sellers_in_area() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);
    let ids = seed(
        &repo,
        &[("a", "north", "x"), ("b", "north", "x"), ("c", "south", "x")],
    )
    .await;

    db.insert_order_item(ids[0].into_inner(), 2).await;
    db.insert_order_item(ids[0].into_inner(), 3).await;
    db.insert_order_item(ids[1].into_inner(), 7).await;
    db.insert_order_item(ids[2].into_inner(), 50).await;

    let top = repo.top_sellers_in_area("north", 10).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].product_id, ids[1]);
    assert_eq!(top[0].total_quantity, Some(7));
    assert_eq!(top[1].product_id, ids[0]);
    assert_eq!(top[1].total_quantity, Some(5));

    assert!(repo.top_sellers_in_area("west", 10).await.unwrap().is_empty());
}
