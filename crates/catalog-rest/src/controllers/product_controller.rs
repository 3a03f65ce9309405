//! Product catalog controller.

use crate::{
    extractors::{ValidatedJson, ValidatedQuery},
    responses::{created, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_core::{CatalogError, ErrorResponse, ListingFilter, ProductId};
use catalog_service::{
    CreateProductRequest, CreateProductResponse, ProductResponse, TopProductResponse,
};
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/product", get(list_products).post(create_product))
        .route("/product/top-products", get(missing_area))
        .route("/product/top-products/", get(missing_area))
        .route("/product/top-products/:area", get(top_products))
        .route("/product/:id", get(get_product))
}

/// List products.
#[utoipa::path(
    get,
    path = "/product",
    tag = "products",
    params(ListingFilter),
    responses(
        (status = 200, description = "Matching products", body = Vec<ProductResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    ValidatedQuery(filter): ValidatedQuery<ListingFilter>,
) -> ApiResult<Vec<ProductResponse>> {
    debug!("List products request: {:?}", filter);

    let products = state.product_service.list_products(filter).await?;
    ok(products)
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/product",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = CreateProductResponse),
        (status = 400, description = "Invalid payload or rejected by the store", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<CreateProductResponse>), AppError> {
    debug!("Create product request: {}", request.name);

    let product = state.product_service.create_product(request).await?;
    Ok(created(CreateProductResponse::created(product)))
}

/// Get a product by id.
#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductResponse> {
    debug!("Get product request: {}", id);

    let id = ProductId::parse(&id)?;
    let product = state
        .product_service
        .get_product(id)
        .await?
        .ok_or_else(|| CatalogError::not_found(format!("Product with id {id} not found")))?;

    ok(product)
}

/// Best sellers of an area.
#[utoipa::path(
    get,
    path = "/product/top-products/{area}",
    tag = "products",
    params(("area" = String, Path, description = "Sales area")),
    responses(
        (status = 200, description = "Up to ten best sellers, highest first", body = Vec<TopProductResponse>),
        (status = 400, description = "Blank area", body = ErrorResponse),
        (status = 404, description = "No orders in the area", body = ErrorResponse)
    )
)]
pub async fn top_products(
    State(state): State<AppState>,
    Path(area): Path<String>,
) -> ApiResult<Vec<TopProductResponse>> {
    debug!("Top products request: {}", area);

    let ranking = state.product_service.top_products(&area).await?;
    ok(ranking)
}

async fn missing_area() -> AppError {
    AppError(CatalogError::invalid_argument("Area must be provided"))
}
