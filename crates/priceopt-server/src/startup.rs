//! Server startup utilities.

use priceopt_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____       _             ____        __
   / __ \_____(_)_______    / __ \____  / /_
  / /_/ / ___/ / ___/ _ \  / / / / __ \/ __/
 / ____/ /  / / /__/  __/ / /_/ / /_/ / /_
/_/   /_/  /_/\___/\___/  \____/ .___/\__/
                              /_/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("REST API:  http://{}", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    if config.observability.metrics_enabled {
        info!("Metrics:   http://{}{}", addr, config.observability.metrics_path);
    }
    info!("Store:     {}", config.database.backend);
    info!("Cache:     {}", config.cache.backend);
    info!("{}", separator);
}
