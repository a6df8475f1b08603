//! Prometheus metrics endpoint.

use crate::{responses::AppError, state::AppState};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use priceopt_core::PricingError;

/// Renders the Prometheus text exposition.
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => AppError(PricingError::not_found("endpoint", "metrics")).into_response(),
    }
}
