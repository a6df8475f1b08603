//! Timeout error handling for the request timeout layer.

use crate::responses::AppError;
use axum::{
    response::{IntoResponse, Response},
    BoxError,
};
use priceopt_core::PricingError;

/// Maps errors raised by `tower::timeout::TimeoutLayer` to API errors.
///
/// An elapsed deadline becomes 503 `TIMEOUT`; anything else is a 500.
pub async fn handle_timeout_error(err: BoxError) -> Response {
    let error = if err.is::<tower::timeout::error::Elapsed>() {
        PricingError::Timeout("request deadline exceeded".to_string())
    } else {
        PricingError::internal(format!("Unhandled middleware error: {}", err))
    };
    AppError(error).into_response()
}
