//! Application wiring.
//!
//! Builds the baseline store, cache, pricing service and router from an
//! `AppConfig`, then serves them until a shutdown signal arrives.

use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use priceopt_config::{AppConfig, CacheBackend, StoreBackend};
use priceopt_core::{HealthCheck, PricingError, PricingResult, SkuBaseline};
use priceopt_repository::{
    create_pool, BaselineRepository, DatabasePool, DatabasePoolInterface,
    InMemoryBaselineRepository, PgBaselineRepository,
};
use priceopt_rest::{create_router, AppState};
use priceopt_service::{CacheInterface, InMemoryCache, PricingServiceImpl, RedisCacheService};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Baseline store plus the handles needed for readiness and shutdown.
struct Store {
    repository: Arc<dyn BaselineRepository>,
    health: Arc<dyn HealthCheck>,
    pool: Option<Arc<DatabasePool>>,
}

/// Cache plus its readiness check.
struct Cache {
    cache: Arc<dyn CacheInterface>,
    health: Arc<dyn HealthCheck>,
}

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: AppConfig,
    metrics: Option<PrometheusHandle>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            metrics: None,
        }
    }

    /// Sets the Prometheus handle served on the metrics path.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Connects the store and cache and builds the router.
    pub async fn build(self) -> PricingResult<Application> {
        let config = self.config;

        let store = build_store(&config).await?;
        if config.database.seed_demo_data {
            seed_demo_baseline(store.repository.as_ref()).await?;
        }

        let cache = build_cache(&config)?;

        let service = PricingServiceImpl::from_config(
            store.repository.clone(),
            cache.cache.clone(),
            &config.pricing,
            &config.cache,
        );

        let mut state = AppState::new(Arc::new(service))
            .with_health_check(store.health.clone())
            .with_health_check(cache.health.clone());
        if let Some(handle) = self.metrics {
            state = state.with_metrics(handle);
        }

        let router = create_router(state, &config);

        Ok(Application {
            config,
            router,
            pool: store.pool,
        })
    }
}

/// A fully wired application, ready to serve.
pub struct Application {
    config: AppConfig,
    router: Router,
    pool: Option<Arc<DatabasePool>>,
}

impl Application {
    /// Returns a clone of the router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Returns the configuration the application was built from.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Serves HTTP until Ctrl+C or SIGTERM, then closes the database pool.
    pub async fn serve(self) -> PricingResult<()> {
        let addr = self.config.server.addr();
        info!("Starting REST server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| PricingError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| PricingError::Internal(format!("REST server error: {}", e)))?;

        if let Some(pool) = self.pool {
            pool.close().await;
        }

        info!("Server shutdown complete");
        Ok(())
    }
}

async fn build_store(config: &AppConfig) -> PricingResult<Store> {
    match config.database.backend {
        StoreBackend::Postgres => {
            let pool = create_pool(&config.database).await?;
            if config.database.run_migrations {
                pool.run_migrations().await?;
            }
            Ok(Store {
                repository: Arc::new(PgBaselineRepository::new(pool.clone())),
                health: pool.clone(),
                pool: Some(pool),
            })
        }
        StoreBackend::Memory => {
            info!("Using in-memory baseline store; data is lost on restart");
            let repository = Arc::new(InMemoryBaselineRepository::new());
            Ok(Store {
                repository: repository.clone(),
                health: repository,
                pool: None,
            })
        }
    }
}

fn build_cache(config: &AppConfig) -> PricingResult<Cache> {
    match config.cache.backend {
        CacheBackend::Redis => {
            let cache = Arc::new(RedisCacheService::from_config(&config.redis)?);
            Ok(Cache {
                cache: cache.clone(),
                health: cache,
            })
        }
        CacheBackend::Memory => {
            let cache = Arc::new(InMemoryCache::new());
            cache.spawn_purge_task(config.cache.purge_interval());
            Ok(Cache {
                cache: cache.clone(),
                health: cache,
            })
        }
        CacheBackend::Disabled => {
            info!("Caching disabled; every quote reads the store");
            let cache = Arc::new(RedisCacheService::disabled());
            Ok(Cache {
                cache: cache.clone(),
                health: cache,
            })
        }
    }
}

/// Inserts the demo baseline unless its SKU is already stored.
///
/// Returns true if the baseline was inserted.
pub async fn seed_demo_baseline(repository: &dyn BaselineRepository) -> PricingResult<bool> {
    let demo = SkuBaseline::demo();
    if repository.find_by_sku(&demo.sku).await?.is_some() {
        return Ok(false);
    }
    repository.upsert(&demo).await?;
    info!("Seeded demo baseline {}", demo.sku);
    Ok(true)
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use priceopt_core::Sku;
    use tower::ServiceExt;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.cache.backend = CacheBackend::Memory;
        config
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_memory_app_serves_demo_quote() {
        let app = AppBuilder::new(memory_config()).build().await.unwrap();

        let (status, body) = get_json(app.router(), "/price?sku=SKU123").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 100.0);
    }

    #[tokio::test]
    async fn test_without_seeding_demo_is_unknown() {
        let mut config = memory_config();
        config.database.seed_demo_data = false;
        let app = AppBuilder::new(config).build().await.unwrap();

        let (status, body) = get_json(app.router(), "/price?sku=SKU123").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_disabled_cache_app_is_ready() {
        let mut config = memory_config();
        config.cache.backend = CacheBackend::Disabled;
        let app = AppBuilder::new(config).build().await.unwrap();

        let (status, body) = get_json(app.router(), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["components"][0]["name"], "store");
        assert_eq!(body["components"][1]["name"], "cache");
    }

    #[tokio::test]
    async fn test_seed_does_not_overwrite_existing() {
        let custom = SkuBaseline::new(Sku::new_unchecked("SKU123"), 50.0, 20.0);
        let repository = InMemoryBaselineRepository::with_baselines([custom]);

        assert!(!seed_demo_baseline(&repository).await.unwrap());
        let stored = repository
            .find_by_sku(&Sku::new_unchecked("SKU123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.base_price, 50.0);

        let empty = InMemoryBaselineRepository::new();
        assert!(seed_demo_baseline(&empty).await.unwrap());
        assert_eq!(empty.count().await.unwrap(), 1);
    }
}
