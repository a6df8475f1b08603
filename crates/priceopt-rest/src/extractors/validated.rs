//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes a JSON body and runs the `validator`
//! rules on it. Malformed bodies are rejected with 400 `INVALID_JSON`,
//! bodies over the configured size limit with 413 `PAYLOAD_TOO_LARGE`.
//! Bodies that parse but fail validation get 422 with one `FieldError`
//! per violated rule.

use crate::responses::error_response;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use priceopt_core::field_errors;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::{Validate, ValidationErrors};

/// JSON extractor that validates the deserialized value.
///
/// ```ignore
/// async fn upsert(ValidatedJson(request): ValidatedJson<UpsertBaselineRequest>) {
///     // request has passed validation here
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

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// Body could not be read or deserialized.
    JsonError(JsonRejection),
    /// Body deserialized but failed validation.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                error_response(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "PAYLOAD_TOO_LARGE",
                    "Request body exceeds the size limit",
                    None,
                )
            }
            Self::JsonError(rejection) => error_response(
                StatusCode::BAD_REQUEST,
                "INVALID_JSON",
                format!("Invalid JSON: {}", rejection.body_text()),
                None,
            ),
            Self::ValidationError(errors) => error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                "Request validation failed",
                Some(field_errors(&errors)),
            ),
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value.validate().map_err(|errors| {
            debug!("Request body failed validation: {}", errors);
            ValidatedJsonRejection::ValidationError(errors)
        })?;

        Ok(ValidatedJson(value))
    }
}
