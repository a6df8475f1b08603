//! Logging and metrics setup.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use priceopt_config::{LogFormat, ObservabilityConfig};
use priceopt_core::{PricingError, PricingResult};
use priceopt_service::metrics::register_metrics;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Builds the default filter directive for a base log level.
#[must_use]
pub fn default_filter(log_level: &str) -> String {
    format!("{},priceopt=debug,tower_http=debug", log_level)
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured log level. Calling this
/// twice is harmless; the second call leaves the first subscriber in place.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.log_level)));

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(true).boxed(),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Installs the global Prometheus recorder and describes the pricing metrics.
pub fn install_metrics_recorder() -> PricingResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| PricingError::Configuration(format!("Failed to install metrics recorder: {}", e)))?;
    register_metrics();
    Ok(handle)
}
