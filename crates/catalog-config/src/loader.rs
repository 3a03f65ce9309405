//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use catalog_core::CatalogError;
use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable prefix for structured overrides.
pub const ENV_PREFIX: &str = "CATALOG";

/// Unprefixed variables honored for compatibility with existing deployments,
/// mapped to the configuration key they override.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("REDIS_URL", "redis.url"),
    ("PUSHOVER_KEY", "notification.token"),
    ("PUSHOVER_USER", "notification.user"),
    ("PORT", "server.port"),
];

/// Loads and validates the layered configuration once at startup.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `CATALOG_` prefix
    /// 5. Legacy variables (`DATABASE_URL`, `REDIS_URL`, `PUSHOVER_KEY`, ...),
    ///    applied as overrides so they beat every source above
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, CatalogError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, CatalogError> {
        Self::new("./config")
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, CatalogError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("CATALOG_ENV").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let builder = file_sources(Config::builder(), config_dir, &environment).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        let builder = legacy_overrides(builder, |key| std::env::var(key).ok())
            .map_err(config_error_to_catalog_error)?;

        let app_config = build(builder)?;
        ConfigValidator::validate(&app_config)
            .map_err(|errors| CatalogError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

/// Adds the TOML layers found in `config_dir`.
fn file_sources(
    mut builder: ConfigBuilder<DefaultState>,
    config_dir: &str,
    environment: &str,
) -> ConfigBuilder<DefaultState> {
    for name in ["default", environment, "local"] {
        let path = format!("{config_dir}/{name}.toml");
        if Path::new(&path).exists() {
            debug!("Loading config from: {}", path);
            builder = builder.add_source(File::with_name(&path).required(false));
        }
    }
    builder
}

/// Applies the unprefixed compatibility variables.
///
/// A complete Pushover credential pair also switches notifications on.
fn legacy_overrides<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let present = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    for (var, key) in LEGACY_ENV_KEYS {
        let value = present(var);
        if value.is_some() {
            debug!("Applying {} from environment", var);
        }
        builder = builder.set_override_option(*key, value)?;
    }

    if present("PUSHOVER_KEY").is_some() && present("PUSHOVER_USER").is_some() {
        builder = builder.set_override("notification.enabled", true)?;
    }

    Ok(builder)
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, CatalogError> {
    builder
        .build()
        .map_err(config_error_to_catalog_error)?
        .try_deserialize()
        .map_err(config_error_to_catalog_error)
}

fn config_error_to_catalog_error(err: ConfigError) -> CatalogError {
    CatalogError::Configuration(err.to_string())
}
