//! Product service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, CACHE_TTL};
use crate::dto::{CreateProductRequest, ProductResponse, TopProductResponse};
use crate::notification::{Notification, Notifier};
use crate::product_service::ProductService;
use async_trait::async_trait;
use catalog_core::{
    CatalogError, CatalogResult, ListingFilter, NewProduct, Product, ProductId, ValidateExt,
};
use catalog_repository::ProductRepository;
use serde::{de::DeserializeOwned, Serialize};
use shaku::Component;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Number of entries in an area ranking.
pub const TOP_PRODUCTS_LIMIT: u32 = 10;

const UNKNOWN_NAME: &str = "Unknown";
const UNKNOWN_CATEGORY: &str = "Uncategorized";

/// Product service.
///
/// Reads go through the cache; a cache that cannot be reached behaves as an
/// empty one. Writes go straight to the store and are never cached.
#[derive(Component)]
#[shaku(interface = ProductService)]
pub struct ProductServiceImpl {
    #[shaku(inject)]
    product_repository: Arc<dyn ProductRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(inject)]
    notifier: Arc<dyn Notifier>,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    pub fn new(
        product_repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            product_repository,
            cache,
            notifier,
        }
    }

    async fn cached<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache read failed for '{}', using store: {}", key, e);
                None
            }
        }
    }

    async fn store_cached<T: Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set(key, value, CACHE_TTL).await {
            warn!("Cache write failed for '{}': {}", key, e);
        }
    }

    async fn announce(&self, product: &Product) {
        let notification = Notification::product_created(product);
        if let Err(e) = self.notifier.send(&notification).await {
            warn!("Failed to send notification for product {}: {}", product.id, e);
        }
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn create_product(&self, request: CreateProductRequest) -> CatalogResult<ProductResponse> {
        debug!("Creating product: {}", request.name);

        request.validate_request()?;

        let product = self
            .product_repository
            .create(&NewProduct::from(request))
            .await?;

        info!("Product created: {}", product.id);
        self.announce(&product).await;

        Ok(ProductResponse::from(product))
    }

    async fn list_products(&self, filter: ListingFilter) -> CatalogResult<Vec<ProductResponse>> {
        filter.validate_request()?;
        let filter = filter.normalized();

        let cache_key = cache_keys::products_listing(&filter)?;
        if let Some(cached) = self.cached::<Vec<ProductResponse>>(&cache_key).await {
            debug!("Cache hit for listing: {}", cache_key);
            return Ok(cached);
        }

        let query = filter.to_query();
        debug!("Listing products: {:?}", query);

        let products: Vec<ProductResponse> = self
            .product_repository
            .find_many(&query)
            .await?
            .into_iter()
            .map(ProductResponse::from)
            .collect();

        self.store_cached(&cache_key, &products).await;
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<Option<ProductResponse>> {
        debug!("Getting product: {}", id);

        let product = self.product_repository.find_by_id(id).await?;
        Ok(product.map(ProductResponse::from))
    }

    async fn top_products(&self, area: &str) -> CatalogResult<Vec<TopProductResponse>> {
        if area.trim().is_empty() {
            return Err(CatalogError::invalid_argument("Area must be provided"));
        }

        let cache_key = cache_keys::top_products(area);
        if let Some(cached) = self.cached::<Vec<TopProductResponse>>(&cache_key).await {
            debug!("Cache hit for top products: {}", area);
            return Ok(cached);
        }

        let sales = self
            .product_repository
            .top_sellers_in_area(area, TOP_PRODUCTS_LIMIT)
            .await?;

        if sales.is_empty() {
            return Err(CatalogError::not_found(format!(
                "No top products found for the area: {area}"
            )));
        }

        let ids: Vec<ProductId> = sales.iter().map(|s| s.product_id).collect();
        let mut products: HashMap<ProductId, Product> = self
            .product_repository
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let ranking: Vec<TopProductResponse> = sales
            .iter()
            .map(|entry| {
                let (name, category) = products.remove(&entry.product_id).map_or_else(
                    || (UNKNOWN_NAME.to_string(), UNKNOWN_CATEGORY.to_string()),
                    |p| (p.name, p.category),
                );
                TopProductResponse {
                    id: entry.product_id,
                    name,
                    category,
                    total_orders: entry.total_or_zero(),
                }
            })
            .collect();

        self.store_cached(&cache_key, &ranking).await;
        Ok(ranking)
    }
}

impl std::fmt::Debug for ProductServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{ProductQuery, ProductSales};
    use std::sync::Mutex;
    use std::time::Duration;

    // ---- Mock repository ----

    #[derive(Default)]
    struct MockProductRepository {
        products: Mutex<Vec<Product>>,
        sales: Vec<ProductSales>,
        fail_create: bool,
        fail_reads: bool,
        find_many_calls: Mutex<Vec<ProductQuery>>,
        top_sellers_calls: Mutex<Vec<(String, u32)>>,
        find_by_ids_calls: Mutex<Vec<Vec<ProductId>>>,
    }

    impl MockProductRepository {
        fn with_products(products: Vec<Product>) -> Self {
            Self {
                products: Mutex::new(products),
                ..Self::default()
            }
        }

        fn with_sales(mut self, sales: Vec<ProductSales>) -> Self {
            self.sales = sales;
            self
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn find_many(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>> {
            self.find_many_calls.lock().unwrap().push(query.clone());
            if self.fail_reads {
                return Err(CatalogError::Database("connection reset".into()));
            }
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .filter(|p| !query.has_category_filter() || query.categories.contains(&p.category))
                .filter(|p| query.cursor.map_or(true, |c| p.id.into_inner() > c))
                .skip(query.skip as usize)
                .take(query.take as usize)
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
            Ok(self.products.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn find_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<Product>> {
            self.find_by_ids_calls.lock().unwrap().push(ids.to_vec());
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect())
        }

        async fn top_sellers_in_area(&self, area: &str, limit: u32) -> CatalogResult<Vec<ProductSales>> {
            self.top_sellers_calls
                .lock()
                .unwrap()
                .push((area.to_string(), limit));
            Ok(self.sales.clone())
        }

        async fn create(&self, product: &NewProduct) -> CatalogResult<Product> {
            if self.fail_create {
                return Err(CatalogError::BadRequest("Failed to create product".into()));
            }
            let mut products = self.products.lock().unwrap();
            let id = ProductId::new(products.len() as i64 + 1);
            let created = product.clone().with_id(id);
            products.push(created.clone());
            Ok(created)
        }
    }

    // ---- Mock cache ----

    #[derive(Default)]
    struct MockCache {
        entries: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<(String, Duration)>>,
        unavailable: bool,
    }

    impl MockCache {
        fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }

        fn seed(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }

        fn entry(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        fn write_count(&self) -> usize {
            self.writes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CacheInterface for MockCache {
        async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
            if self.unavailable {
                return Err(CatalogError::Cache("connection refused".into()));
            }
            Ok(self.entry(key))
        }

        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
            if self.unavailable {
                return Err(CatalogError::Cache("connection refused".into()));
            }
            self.writes.lock().unwrap().push((key.to_string(), ttl));
            self.seed(key, value);
            Ok(())
        }

        async fn ping(&self) -> CatalogResult<()> {
            Ok(())
        }

        async fn close(&self) {}

        fn is_enabled(&self) -> bool {
            true
        }
    }

    // ---- Mock notifier ----

    #[derive(Default)]
    struct MockNotifier {
        sent: Mutex<Vec<Notification>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn send(&self, notification: &Notification) -> CatalogResult<()> {
            self.sent.lock().unwrap().push(notification.clone());
            if self.fail {
                return Err(CatalogError::external("pushover", "HTTP 500"));
            }
            Ok(())
        }
    }

    // ---- Helpers ----

    struct Fixture {
        repository: Arc<MockProductRepository>,
        cache: Arc<MockCache>,
        notifier: Arc<MockNotifier>,
        service: ProductServiceImpl,
    }

    fn fixture(repository: MockProductRepository, cache: MockCache, notifier: MockNotifier) -> Fixture {
        let repository = Arc::new(repository);
        let cache = Arc::new(cache);
        let notifier = Arc::new(notifier);
        let service = ProductServiceImpl::new(repository.clone(), cache.clone(), notifier.clone());
        Fixture {
            repository,
            cache,
            notifier,
            service,
        }
    }

    fn product(id: i64, name: &str, area: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            area: area.to_string(),
            category: category.to_string(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Laptop", "north", "electronics"),
            product(2, "Kettle", "north", "kitchen"),
            product(3, "Phone", "south", "electronics"),
        ]
    }

    fn create_request(name: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            area: "north".to_string(),
            category: "home".to_string(),
        }
    }

    // ---- Listing ----

    #[tokio::test]
    async fn test_list_cache_hit_skips_store() {
        let f = fixture(
            MockProductRepository::with_products(catalog()),
            MockCache::default(),
            MockNotifier::default(),
        );
        let filter = ListingFilter::new().categories(["electronics"]).skip(0).take(10);
        f.cache.seed(
            r#"products:{"categories":["electronics"],"skip":0,"take":10}"#,
            r#"[{"id":99,"name":"Cached","area":"west","category":"electronics"}]"#,
        );

        let products = f.service.list_products(filter).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Cached");
        assert!(f.repository.find_many_calls.lock().unwrap().is_empty());
        assert_eq!(f.cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_list_miss_populates_cache_with_ttl() {
        let f = fixture(
            MockProductRepository::with_products(catalog()),
            MockCache::default(),
            MockNotifier::default(),
        );
        let filter = ListingFilter::new().categories(["electronics"]);

        let products = f.service.list_products(filter).await.unwrap();
        assert_eq!(products.len(), 2);

        let key = r#"products:{"categories":["electronics"]}"#;
        let writes = f.cache.writes.lock().unwrap().clone();
        assert_eq!(writes, vec![(key.to_string(), Duration::from_secs(60))]);

        let cached: Vec<ProductResponse> = serde_json::from_str(&f.cache.entry(key).unwrap()).unwrap();
        assert_eq!(cached, products);
    }

    #[tokio::test]
    async fn test_list_applies_default_pagination() {
        let f = fixture(
            MockProductRepository::default(),
            MockCache::default(),
            MockNotifier::default(),
        );

        f.service.list_products(ListingFilter::new()).await.unwrap();

        let calls = f.repository.find_many_calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![ProductQuery {
                categories: vec![],
                skip: 0,
                take: 20,
                cursor: None,
            }]
        );
    }

    #[tokio::test]
    async fn test_list_blank_category_is_no_filter() {
        let f = fixture(
            MockProductRepository::with_products(catalog()),
            MockCache::default(),
            MockNotifier::default(),
        );
        let filter = ListingFilter {
            categories: vec![String::new()],
            ..ListingFilter::default()
        };

        f.service.list_products(filter).await.unwrap();

        let calls = f.repository.find_many_calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].has_category_filter());

        let writes = f.cache.writes.lock().unwrap().clone();
        assert_eq!(writes[0].0, "products:{}");
    }

    #[tokio::test]
    async fn test_list_cursor_keeps_default_skip() {
        let f = fixture(
            MockProductRepository::default(),
            MockCache::default(),
            MockNotifier::default(),
        );
        let filter = ListingFilter::new().categories(["electronics"]).cursor(10).take(10);

        f.service.list_products(filter).await.unwrap();

        let calls = f.repository.find_many_calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![ProductQuery {
                categories: vec!["electronics".to_string()],
                skip: 0,
                take: 10,
                cursor: Some(10),
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_listing_is_cached() {
        let f = fixture(
            MockProductRepository::default(),
            MockCache::default(),
            MockNotifier::default(),
        );

        let products = f.service.list_products(ListingFilter::new()).await.unwrap();
        assert!(products.is_empty());
        assert_eq!(f.cache.entry("products:{}").as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_list_rejects_zero_take() {
        let f = fixture(
            MockProductRepository::default(),
            MockCache::default(),
            MockNotifier::default(),
        );

        let err = f
            .service
            .list_products(ListingFilter::new().take(0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(f.repository.find_many_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_falls_back_to_store_when_cache_is_down() {
        let f = fixture(
            MockProductRepository::with_products(catalog()),
            MockCache::unavailable(),
            MockNotifier::default(),
        );

        let products = f.service.list_products(ListingFilter::new()).await.unwrap();
        assert_eq!(products.len(), 3);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_a_miss() {
        let f = fixture(
            MockProductRepository::with_products(catalog()),
            MockCache::default(),
            MockNotifier::default(),
        );
        f.cache.seed("products:{}", "not json");

        let products = f.service.list_products(ListingFilter::new()).await.unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(f.repository.find_many_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_store_failure_propagates() {
        let repository = MockProductRepository {
            fail_reads: true,
            ..MockProductRepository::default()
        };
        let f = fixture(repository, MockCache::default(), MockNotifier::default());

        let err = f.service.list_products(ListingFilter::new()).await.unwrap_err();
        assert!(err.is_internal());
        assert_eq!(f.cache.write_count(), 0);
    }

    // ---- Get by id ----

    #[tokio::test]
    async fn test_get_product_found_and_missing() {
        let f = fixture(
            MockProductRepository::with_products(catalog()),
            MockCache::default(),
            MockNotifier::default(),
        );

        let found = f.service.get_product(ProductId::new(2)).await.unwrap();
        assert_eq!(found.map(|p| p.name), Some("Kettle".to_string()));

        let missing = f.service.get_product(ProductId::new(42)).await.unwrap();
        assert!(missing.is_none());
        assert_eq!(f.cache.write_count(), 0);
    }

    // ---- Top products ----

    #[tokio::test]
    async fn test_top_products_rejects_blank_area() {
        let f = fixture(
            MockProductRepository::default(),
            MockCache::default(),
            MockNotifier::default(),
        );

        for area in ["", "   "] {
            let err = f.service.top_products(area).await.unwrap_err();
            assert!(matches!(err, CatalogError::InvalidArgument(ref m) if m == "Area must be provided"));
        }
        assert!(f.repository.top_sellers_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_products_empty_aggregation_is_not_found() {
        let f = fixture(
            MockProductRepository::with_products(catalog()),
            MockCache::default(),
            MockNotifier::default(),
        );

        let err = f.service.top_products("east").await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NotFound(ref m) if m == "No top products found for the area: east"
        ));
        assert_eq!(f.cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_top_products_joins_metadata_in_rank_order() {
        let repository = MockProductRepository::with_products(catalog()).with_sales(vec![
            ProductSales::new(ProductId::new(2), Some(40)),
            ProductSales::new(ProductId::new(1), Some(15)),
        ]);
        let f = fixture(repository, MockCache::default(), MockNotifier::default());

        let ranking = f.service.top_products("north").await.unwrap();

        assert_eq!(
            ranking,
            vec![
                TopProductResponse {
                    id: ProductId::new(2),
                    name: "Kettle".to_string(),
                    category: "kitchen".to_string(),
                    total_orders: 40,
                },
                TopProductResponse {
                    id: ProductId::new(1),
                    name: "Laptop".to_string(),
                    category: "electronics".to_string(),
                    total_orders: 15,
                },
            ]
        );
        assert_eq!(
            f.repository.top_sellers_calls.lock().unwrap().clone(),
            vec![("north".to_string(), TOP_PRODUCTS_LIMIT)]
        );
        assert_eq!(f.repository.find_by_ids_calls.lock().unwrap().len(), 1);

        let cached = f.cache.entry("top-products:north").unwrap();
        assert!(cached.contains(r#""totalOrders":40"#));
        assert_eq!(
            f.cache.writes.lock().unwrap()[0].1,
            Duration::from_secs(60)
        );
    }

    #[tokio::test]
    async fn test_top_products_missing_metadata_falls_back() {
        let repository = MockProductRepository::with_products(catalog()).with_sales(vec![
            ProductSales::new(ProductId::new(77), Some(9)),
            ProductSales::new(ProductId::new(78), None),
        ]);
        let f = fixture(repository, MockCache::default(), MockNotifier::default());

        let ranking = f.service.top_products("north").await.unwrap();

        assert_eq!(ranking[0].name, "Unknown");
        assert_eq!(ranking[0].category, "Uncategorized");
        assert_eq!(ranking[0].total_orders, 9);
        assert_eq!(ranking[1].total_orders, 0);
    }

    #[tokio::test]
    async fn test_top_products_cache_hit_skips_store() {
        let f = fixture(
            MockProductRepository::default(),
            MockCache::default(),
            MockNotifier::default(),
        );
        f.cache.seed(
            "top-products:north",
            r#"[{"id":5,"name":"Fan","category":"home","totalOrders":3}]"#,
        );

        let ranking = f.service.top_products("north").await.unwrap();

        assert_eq!(ranking[0].total_orders, 3);
        assert!(f.repository.top_sellers_calls.lock().unwrap().is_empty());
    }

    // ---- Creation ----

    #[tokio::test]
    async fn test_create_product_notifies() {
        let f = fixture(
            MockProductRepository::default(),
            MockCache::default(),
            MockNotifier::default(),
        );

        let created = f.service.create_product(create_request("Desk Lamp")).await.unwrap();

        assert_eq!(created.id, ProductId::new(1));
        assert_eq!(created.name, "Desk Lamp");
        let sent = f.notifier.sent.lock().unwrap().clone();
        assert_eq!(
            sent,
            vec![Notification::new(
                "New Product Created",
                "A new product \"Desk Lamp\" was created in the \"north\" area."
            )]
        );
        assert_eq!(f.cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_create_product_survives_notifier_failure() {
        let notifier = MockNotifier {
            fail: true,
            ..MockNotifier::default()
        };
        let f = fixture(MockProductRepository::default(), MockCache::default(), notifier);

        let created = f.service.create_product(create_request("Desk Lamp")).await.unwrap();

        assert_eq!(created.name, "Desk Lamp");
        assert_eq!(f.notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_product_store_failure_skips_notifier() {
        let repository = MockProductRepository {
            fail_create: true,
            ..MockProductRepository::default()
        };
        let f = fixture(repository, MockCache::default(), MockNotifier::default());

        let err = f
            .service
            .create_product(create_request("Desk Lamp"))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::BadRequest(ref m) if m == "Failed to create product"));
        assert!(f.notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_product_rejects_blank_name() {
        let f = fixture(
            MockProductRepository::default(),
            MockCache::default(),
            MockNotifier::default(),
        );

        let err = f.service.create_product(create_request(" ")).await.unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(f.repository.products.lock().unwrap().is_empty());
    }
}
