//! Main application router.

use crate::{
    controllers::{health_controller, product_controller},
    middleware::{logging_middleware, REQUEST_ID_HEADER},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    http::{HeaderName, HeaderValue},
    middleware, Router,
};
use catalog_config::ServerConfig;
use catalog_core::HealthCheck;
use catalog_service::ProductService;
use shaku::{HasComponent, Module};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router from a Shaku module.
///
/// The module must provide the `ProductService` component. `health_checks`
/// are the dependencies probed by `/ready`.
pub fn create_router<M>(
    module: &M,
    health_checks: Vec<Arc<dyn HealthCheck>>,
    server_config: &ServerConfig,
) -> Router
where
    M: Module + HasComponent<dyn ProductService>,
{
    let state = health_checks
        .into_iter()
        .fold(AppState::from_module(module), AppState::with_health_check);

    router_with_state(state, server_config)
}

/// Creates the router around an already assembled state.
pub fn router_with_state(state: AppState, server_config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let router = Router::new()
        .merge(health_controller::router())
        .merge(product_controller::router())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid));

    info!("Router created with product endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
