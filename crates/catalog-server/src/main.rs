//! # Catalog Server
//!
//! Entry point: loads configuration, installs logging and runs the
//! application until a shutdown signal arrives.

use catalog_config::ConfigLoader;
use catalog_core::CatalogResult;
use catalog_server::{app::AppBuilder, telemetry::init_logging};
use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Logging may not be installed yet.
        eprintln!("Application error: {e}");
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> CatalogResult<()> {
    let config = ConfigLoader::from_default_location()?.into_config();
    init_logging(&config.observability)?;

    AppBuilder::new().with_config(config).run().await
}
