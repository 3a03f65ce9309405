//! Product-related DTOs.

use catalog_core::rules::not_blank;
use catalog_core::{NewProduct, Product, ProductId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Name cannot exceed 255 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Area cannot exceed 255 characters")
    )]
    pub area: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Category cannot exceed 255 characters")
    )]
    pub category: String,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        Self::new(request.name, request.area, request.category)
    }
}

/// Product response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(value_type = i64)]
    pub id: ProductId,
    pub name: String,
    pub area: String,
    pub category: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            area: product.area,
            category: product.category,
        }
    }
}

/// One row of an area's best-seller ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductResponse {
    #[schema(value_type = i64)]
    pub id: ProductId,
    pub name: String,
    pub category: String,
    /// Sum of ordered quantities.
    pub total_orders: i64,
}

/// Response returned after a product is created.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductResponse {
    pub message: String,
    pub product: ProductResponse,
}

impl CreateProductResponse {
    /// Message sent with every successful creation.
    pub const SUCCESS_MESSAGE: &'static str = "Product created successfully";

    /// Wraps a freshly created product.
    #[must_use]
    pub fn created(product: ProductResponse) -> Self {
        Self {
            message: Self::SUCCESS_MESSAGE.to_string(),
            product,
        }
    }
}
