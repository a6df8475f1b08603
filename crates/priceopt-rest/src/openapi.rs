//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{ComponentStatus, HealthResponse, ReadinessResponse};
use priceopt_core::{ErrorResponse, FieldError};
use priceopt_service::{
    BaselineListResponse, BaselineResponse, PriceQuery, PriceResponse, UpsertBaselineRequest,
    UpsertResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the price optimization API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Price Optimization API",
        version = "1.0.0",
        description = "Rule-constrained price quotes for stock-keeping units"
    ),
    paths(
        crate::controllers::price_controller::get_price,
        crate::controllers::price_controller::post_price,
        crate::controllers::baseline_controller::upsert_baseline,
        crate::controllers::baseline_controller::get_baseline,
        crate::controllers::baseline_controller::list_baselines,
        crate::controllers::baseline_controller::delete_baseline,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            PriceQuery,
            PriceResponse,
            UpsertBaselineRequest,
            UpsertResponse,
            BaselineResponse,
            BaselineListResponse,
            HealthResponse,
            ReadinessResponse,
            ComponentStatus,
        )
    ),
    tags(
        (name = "pricing", description = "Price quotes"),
        (name = "baselines", description = "SKU baseline management"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/price", "/baseline", "/baseline/{sku}", "/baselines", "/ready"] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {}",
                expected
            );
        }
    }
}
