//! Baseline management controller.

use crate::{
    extractors::{PaginationQuery, ValidatedJson},
    responses::{no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use priceopt_core::{ErrorResponse, PricingError};
use priceopt_service::{
    BaselineListResponse, BaselineResponse, UpsertBaselineRequest, UpsertResponse,
};
use tracing::debug;

/// Creates the baseline router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/baseline", post(upsert_baseline))
        .route("/baseline/:sku", get(get_baseline).delete(delete_baseline))
        .route("/baselines", get(list_baselines))
}

/// Insert or replace a SKU baseline.
#[utoipa::path(
    post,
    path = "/baseline",
    tag = "baselines",
    request_body = UpsertBaselineRequest,
    responses(
        (status = 200, description = "Baseline stored", body = UpsertResponse),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn upsert_baseline(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpsertBaselineRequest>,
) -> ApiResult<UpsertResponse> {
    debug!("Upsert baseline request: {}", request.sku);

    let response = state.pricing_service.upsert_baseline(request).await?;
    ok(response)
}

/// Get the stored baseline for a SKU.
#[utoipa::path(
    get,
    path = "/baseline/{sku}",
    tag = "baselines",
    params(("sku" = String, Path, description = "Product SKU")),
    responses(
        (status = 200, description = "Stored baseline", body = BaselineResponse),
        (status = 404, description = "Unknown SKU", body = ErrorResponse)
    )
)]
pub async fn get_baseline(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> ApiResult<BaselineResponse> {
    debug!("Get baseline request: {}", sku);

    let response = state.pricing_service.get_baseline(&sku).await?;
    ok(response)
}

/// List baselines ordered by SKU.
#[utoipa::path(
    get,
    path = "/baselines",
    tag = "baselines",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of baselines", body = BaselineListResponse)
    )
)]
pub async fn list_baselines(
    State(state): State<AppState>,
    pagination: Result<Query<PaginationQuery>, QueryRejection>,
) -> ApiResult<BaselineListResponse> {
    let Query(pagination) =
        pagination.map_err(|e| AppError(PricingError::validation(e.body_text())))?;
    debug!("List baselines request");

    let response = state
        .pricing_service
        .list_baselines(pagination.into())
        .await?;
    ok(response)
}

/// Delete a SKU baseline.
#[utoipa::path(
    delete,
    path = "/baseline/{sku}",
    tag = "baselines",
    params(("sku" = String, Path, description = "Product SKU")),
    responses(
        (status = 204, description = "Baseline deleted"),
        (status = 404, description = "Unknown SKU", body = ErrorResponse)
    )
)]
pub async fn delete_baseline(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete baseline request: {}", sku);

    state.pricing_service.delete_baseline(&sku).await?;
    Ok(no_content())
}
