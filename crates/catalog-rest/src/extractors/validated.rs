//! Validating extractors for JSON bodies and query strings.
//!
//! Both extractors deserialize first and then run the `validator` rules.
//! Every failure is answered with 400 Bad Request and an [`ErrorResponse`]
//! body; rule violations carry field-level details.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::{Query, QueryRejection};
use catalog_core::{field_errors, ErrorResponse};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON extractor that automatically validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// use catalog_rest::extractors::ValidatedJson;
///
/// async fn create_product(ValidatedJson(request): ValidatedJson<CreateProductRequest>) {
///     // request is guaranteed to be valid here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Query string extractor that supports repeated keys and validates the
/// deserialized value.
#[derive(Debug, Clone, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T> std::ops::Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for the validating extractors.
#[derive(Debug)]
pub enum ValidationRejection {
    /// Body was not valid JSON for the target type.
    Json(JsonRejection),
    /// Query string could not be deserialized.
    Query(QueryRejection),
    /// Deserialized value broke a validation rule.
    Rules(ValidationErrors),
}

impl ValidationRejection {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            Self::Json(rejection) => ErrorResponse {
                code: "INVALID_JSON".to_string(),
                message: format!("Invalid JSON: {}", rejection.body_text()),
                details: None,
            },
            Self::Query(rejection) => ErrorResponse {
                code: "INVALID_ARGUMENT".to_string(),
                message: format!("Invalid query parameters: {rejection}"),
                details: None,
            },
            Self::Rules(errors) => ErrorResponse {
                code: "VALIDATION_ERROR".to_string(),
                message: "Request validation failed".to_string(),
                details: Some(field_errors(errors)),
            },
        }
    }
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self.to_error_response())).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;

        value.validate().map_err(ValidationRejection::Rules)?;

        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;

        value.validate().map_err(ValidationRejection::Rules)?;

        Ok(Self(value))
    }
}
