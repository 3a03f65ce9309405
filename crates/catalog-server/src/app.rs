//! Application builder and lifecycle.

use crate::di::{build_catalog_module, CatalogResolver};
use crate::startup::{print_banner, print_startup_info};
use catalog_config::{AppConfig, RedisConfig};
use catalog_core::{CatalogError, CatalogResult, HealthCheck};
use catalog_repository::{DatabasePool, DatabasePoolInterface};
use catalog_rest::create_router;
use catalog_service::{create_redis_pool, CacheInterface, PushoverNotifier, RedisCacheService};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    #[must_use]
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Opens every connection, serves HTTP until a shutdown signal arrives,
    /// then releases the cache and the database pool in that order.
    pub async fn run(self) -> CatalogResult<()> {
        let config = self.config.unwrap_or_default();
        print_banner(&config);

        let db_pool = DatabasePool::connect(&config.database).await?;
        if config.database.run_migrations {
            db_pool.run_migrations().await?;
        }

        let cache = connect_cache(&config.redis)?;
        if let Err(e) = cache.ping().await {
            warn!("Redis is not reachable, continuing with cache misses: {}", e);
        }

        let notifier = PushoverNotifier::from_config(&config.notification)?;

        let health_checks: Vec<Arc<dyn HealthCheck>> =
            vec![Arc::new(db_pool.clone()), Arc::new(cache.clone())];
        let module = build_catalog_module(db_pool, cache, notifier);
        let router = create_router(module.as_ref(), health_checks, &config.server);

        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to bind {addr}: {e}")))?;
        print_startup_info(&config);

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CatalogError::Internal(format!("HTTP server error: {e}")));

        module.cache().close().await;
        module.database_pool().close().await;

        info!("Server shutdown complete");
        served
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the cache client. A disabled Redis section yields a cache that
/// always misses.
pub fn connect_cache(config: &RedisConfig) -> CatalogResult<RedisCacheService> {
    if !config.enabled {
        info!("Redis cache disabled");
        return Ok(RedisCacheService::disabled());
    }

    let pool = create_redis_pool(config)?;
    info!("Redis connection pool created");
    Ok(RedisCacheService::new(Arc::new(pool)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
