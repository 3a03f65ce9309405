//! Dependency injection module using Shaku.
//!
//! `CatalogModule` wires the whole stack:
//!
//! ```text
//! ProductServiceImpl
//!   ├─ ProductRepositoryImpl ─┬─ MySqlProductDaoImpl ──┐
//!   │                         └─ MySqlOrderItemDaoImpl ┴─ DatabasePool
//!   ├─ RedisCacheService
//!   └─ PushoverNotifier
//! ```
//!
//! The pool, cache and notifier hold live connections, so they are built
//! before the module and handed over as component overrides.

use catalog_core::{module, HasComponent};
use catalog_repository::{
    DatabasePool, DatabasePoolInterface, MySqlOrderItemDaoImpl, MySqlProductDaoImpl,
    ProductRepository, ProductRepositoryImpl,
};
use catalog_service::{
    CacheInterface, Notifier, ProductService, ProductServiceImpl, PushoverNotifier,
    RedisCacheService,
};
use std::sync::Arc;

module! {
    pub CatalogModule {
        components = [
            DatabasePool,
            MySqlProductDaoImpl,
            MySqlOrderItemDaoImpl,
            ProductRepositoryImpl,
            RedisCacheService,
            PushoverNotifier,
            ProductServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the catalog module around already opened connections.
#[must_use]
pub fn build_catalog_module(
    db_pool: DatabasePool,
    cache: RedisCacheService,
    notifier: PushoverNotifier,
) -> Arc<CatalogModule> {
    let module = CatalogModule::builder()
        .with_component_override::<dyn DatabasePoolInterface>(Box::new(db_pool))
        .with_component_override::<dyn CacheInterface>(Box::new(cache))
        .with_component_override::<dyn Notifier>(Box::new(notifier))
        .build();

    Arc::new(module)
}

/// Typed accessors for the components the server needs directly.
pub trait CatalogResolver {
    /// Resolves the product service.
    fn product_service(&self) -> Arc<dyn ProductService>;

    /// Resolves the database pool.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;

    /// Resolves the cache.
    fn cache(&self) -> Arc<dyn CacheInterface>;
}

impl CatalogResolver for CatalogModule {
    fn product_service(&self) -> Arc<dyn ProductService> {
        self.resolve()
    }

    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }
}
