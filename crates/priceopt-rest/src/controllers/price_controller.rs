//! Price quote controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use priceopt_core::{ErrorResponse, PricingError};
use priceopt_service::{PriceQuery, PriceResponse};
use tracing::debug;

/// Creates the price router.
pub fn router() -> Router<AppState> {
    Router::new().route("/price", get(get_price).post(post_price))
}

/// Quote a price from query parameters.
#[utoipa::path(
    get,
    path = "/price",
    tag = "pricing",
    params(PriceQuery),
    responses(
        (status = 200, description = "Optimized price", body = PriceResponse),
        (status = 400, description = "Invalid SKU or competitor price", body = ErrorResponse),
        (status = 404, description = "Unknown SKU", body = ErrorResponse)
    )
)]
pub async fn get_price(
    State(state): State<AppState>,
    query: Result<Query<PriceQuery>, QueryRejection>,
) -> ApiResult<PriceResponse> {
    let Query(query) = query.map_err(|e| AppError(PricingError::validation(e.body_text())))?;
    debug!("Price request: {}", query.sku);

    let response = state.pricing_service.quote(query).await?;
    ok(response)
}

/// Quote a price from a JSON body.
#[utoipa::path(
    post,
    path = "/price",
    tag = "pricing",
    request_body = PriceQuery,
    responses(
        (status = 200, description = "Optimized price", body = PriceResponse),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 404, description = "Unknown SKU", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn post_price(
    State(state): State<AppState>,
    ValidatedJson(query): ValidatedJson<PriceQuery>,
) -> ApiResult<PriceResponse> {
    debug!("Price request: {}", query.sku);

    let response = state.pricing_service.quote(query).await?;
    ok(response)
}
