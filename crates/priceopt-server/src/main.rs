//! # Priceopt Server
//!
//! Main entry point for the price optimization service.

use priceopt_config::{ConfigLoader, ObservabilityConfig};
use priceopt_core::PricingResult;
use priceopt_server::{
    app::AppBuilder,
    startup::{print_banner, print_startup_info},
    telemetry::{init_logging, install_metrics_recorder},
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> PricingResult<()> {
    let config_loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            return Err(e);
        }
    };
    let config = config_loader.get().await;

    init_logging(&config.observability);
    print_banner();

    info!("Starting price optimization server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let mut builder = AppBuilder::new(config.clone());
    if config.observability.metrics_enabled {
        builder = builder.with_metrics(install_metrics_recorder()?);
    }

    let app = builder.build().await?;
    print_startup_info(app.config());
    app.serve().await
}
