//! Main application router.

use crate::{
    controllers::{baseline_controller, health_controller, metrics_controller, price_controller},
    middleware::{handle_timeout_error, logging_middleware},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use priceopt_config::{AppConfig, ServerConfig};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
///
/// The metrics route is mounted at `observability.metrics_path` only when
/// metrics are enabled and the state carries a Prometheus handle.
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let server = &config.server;
    let cors = create_cors_layer(server);

    let mut router = Router::new()
        .merge(health_controller::router())
        .merge(price_controller::router())
        .merge(baseline_controller::router());

    if config.observability.metrics_enabled && state.metrics.is_some() {
        router = router.route(
            &config.observability.metrics_path,
            get(metrics_controller::render_metrics),
        );
        info!("Metrics exposed at {}", config.observability.metrics_path);
    }

    let router = router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(server.request_timeout())),
        )
        .layer(DefaultBodyLimit::max(server.max_body_size))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    info!("Router created with pricing endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    concat!("Price Optimization API v", env!("CARGO_PKG_VERSION"))
}
