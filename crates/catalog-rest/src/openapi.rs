//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{DependencyStatus, HealthResponse, ReadinessResponse};
use catalog_core::{ErrorResponse, FieldError};
use catalog_service::{
    CreateProductRequest, CreateProductResponse, ProductResponse, TopProductResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        version = "1.0.0",
        description = "Product listings, creation and best sellers per area",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // Product endpoints
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::top_products,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            CreateProductRequest,
            CreateProductResponse,
            ProductResponse,
            TopProductResponse,
            HealthResponse,
            ReadinessResponse,
            DependencyStatus,
        )
    ),
    tags(
        (name = "products", description = "Product catalog endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_product_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/product",
            "/product/{id}",
            "/product/top-products/{area}",
            "/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
