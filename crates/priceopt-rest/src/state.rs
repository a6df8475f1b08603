//! Application state for Axum handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use priceopt_core::HealthCheck;
use priceopt_service::PricingService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pricing_service: Arc<dyn PricingService>,
    /// Components reported by the readiness endpoint.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// Prometheus handle, present when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(pricing_service: Arc<dyn PricingService>) -> Self {
        Self {
            pricing_service,
            health_checks: Vec::new(),
            metrics: None,
        }
    }

    /// Adds a component to the readiness check.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }

    /// Sets the Prometheus handle rendered by the metrics endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
