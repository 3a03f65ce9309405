//! Server startup utilities.

use catalog_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner(config: &AppConfig) {
    info!(
        "Starting {} v{} ({})",
        config.app.name, config.app.version, config.app.environment
    );
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let base = format!("http://{}", config.server.addr());
    info!("{}", separator);
    info!("REST API:  {}/product", base);
    info!("Health:    {}/health", base);
    info!("API Docs:  {}/swagger-ui", base);
    info!(
        "Cache:     {}",
        if config.redis.enabled { "redis" } else { "disabled" }
    );
    info!(
        "Notify:    {}",
        if config.notification.enabled { "pushover" } else { "disabled" }
    );
    info!("{}", separator);
}
