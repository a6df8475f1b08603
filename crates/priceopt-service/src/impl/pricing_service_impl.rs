//! Cache-aside pricing service.

use crate::cache::{cache_keys, CacheExt, CacheInterface, BASELINE_TTL, DEFAULT_TTL};
use crate::dto::{
    BaselineListResponse, BaselineResponse, PriceQuery, PriceResponse, UpsertBaselineRequest,
    UpsertResponse,
};
use crate::metrics::{PricingMetrics, QuoteOutcome};
use crate::pricing::{HeuristicPriceModel, PriceModel, PricingRules};
use crate::pricing_service::PricingService;
use async_trait::async_trait;
use priceopt_config::{CacheConfig, PricingConfig};
use priceopt_core::validation::rules::non_negative_amount;
use priceopt_core::{
    PageRequest, PricingError, PricingResult, Sku, SkuBaseline, ValidateExt,
};
use priceopt_repository::BaselineRepository;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Pricing service backed by a baseline repository and a cache.
///
/// Quotes are looked up in the quote cache, then computed from the baseline
/// (itself cached). Cache failures degrade to misses and never fail a
/// request. Writes go to the repository first and then invalidate the SKU's
/// cached baseline and quotes.
///
/// Every write bumps a write generation. A read that populated the cache
/// while the generation moved re-runs invalidation, so a quote computed from
/// a baseline that was replaced mid-flight cannot outlive the write. The
/// generation is per process; replicas sharing a Redis cache only get the
/// TTL bound for writes made elsewhere.
pub struct PricingServiceImpl {
    repository: Arc<dyn BaselineRepository>,
    cache: Arc<dyn CacheInterface>,
    model: Arc<dyn PriceModel>,
    rules: PricingRules,
    price_ttl: Duration,
    baseline_ttl: Duration,
    write_generation: AtomicU64,
}

impl PricingServiceImpl {
    /// Creates a service with the default model, rules and TTLs.
    pub fn new(repository: Arc<dyn BaselineRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            repository,
            cache,
            model: Arc::new(HeuristicPriceModel::default()),
            rules: PricingRules::default(),
            price_ttl: DEFAULT_TTL,
            baseline_ttl: BASELINE_TTL,
            write_generation: AtomicU64::new(0),
        }
    }

    /// Creates a service from the pricing and cache configuration sections.
    pub fn from_config(
        repository: Arc<dyn BaselineRepository>,
        cache: Arc<dyn CacheInterface>,
        pricing: &PricingConfig,
        cache_config: &CacheConfig,
    ) -> Self {
        Self::new(repository, cache)
            .with_model(Arc::new(HeuristicPriceModel::new(pricing.model.clone())))
            .with_rules(PricingRules::new(pricing.rules.clone()))
            .with_ttls(cache_config.price_ttl(), cache_config.baseline_ttl())
    }

    /// Replaces the price model.
    #[must_use]
    pub fn with_model(mut self, model: Arc<dyn PriceModel>) -> Self {
        self.model = model;
        self
    }

    /// Replaces the business rules.
    #[must_use]
    pub fn with_rules(mut self, rules: PricingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the quote and baseline TTLs.
    #[must_use]
    pub fn with_ttls(mut self, price_ttl: Duration, baseline_ttl: Duration) -> Self {
        self.price_ttl = price_ttl;
        self.baseline_ttl = baseline_ttl;
        self
    }

    /// Computes the final price for a baseline.
    ///
    /// Fails when the baseline's amounts are too large to produce a finite
    /// price.
    fn compute_price(
        &self,
        baseline: &SkuBaseline,
        requested_competitor_price: Option<f64>,
    ) -> PricingResult<f64> {
        let competitor = baseline.reference_competitor_price(requested_competitor_price);
        let predicted = self
            .model
            .predict(baseline.base_price, competitor, baseline.inventory);
        let price = self
            .rules
            .apply(predicted, baseline, requested_competitor_price);

        debug!(
            "Priced {} with {} model: predicted {:.4}, final {:.2}",
            baseline.sku,
            self.model.name(),
            predicted,
            price
        );

        if !price.is_finite() {
            return Err(PricingError::validation(format!(
                "Price for SKU '{}' is out of range",
                baseline.sku
            )));
        }
        Ok(price)
    }

    async fn quote_inner(&self, query: PriceQuery) -> PricingResult<(PriceResponse, QuoteOutcome)> {
        query.validate_request()?;
        if let Some(competitor_price) = query.competitor_price {
            non_negative_amount(competitor_price).map_err(|e| {
                PricingError::validation(format!("competitor_price: {}", e.code))
            })?;
        }
        let sku = Sku::parse(query.sku)?;

        let generation = self.write_generation.load(Ordering::SeqCst);
        let cache_key = cache_keys::price_quote(&sku, query.competitor_price);
        if let Some(cached) = self.cache_get::<PriceResponse>(&cache_key, "price").await {
            debug!("Quote cache hit for {}", sku);
            return Ok((cached, QuoteOutcome::Cached));
        }

        let baseline = self.load_baseline(&sku).await?;
        let response = PriceResponse {
            sku: sku.to_string(),
            price: self.compute_price(&baseline, query.competitor_price)?,
        };

        self.cache_set(&cache_key, &response, self.price_ttl).await;
        self.discard_if_stale(&sku, generation).await;
        Ok((response, QuoteOutcome::Computed))
    }

    /// Loads a baseline through the baseline cache.
    async fn load_baseline(&self, sku: &Sku) -> PricingResult<SkuBaseline> {
        let cache_key = cache_keys::baseline(sku);
        if let Some(cached) = self.cache_get::<SkuBaseline>(&cache_key, "baseline").await {
            return Ok(cached);
        }

        let baseline = self
            .repository
            .find_by_sku(sku)
            .await?
            .ok_or_else(|| PricingError::sku_not_found(sku))?;

        self.cache_set(&cache_key, &baseline, self.baseline_ttl).await;
        Ok(baseline)
    }

    /// Re-runs invalidation when a write landed since `generation` was read.
    async fn discard_if_stale(&self, sku: &Sku, generation: u64) {
        if self.write_generation.load(Ordering::SeqCst) != generation {
            debug!("Baseline for {} changed while reading, dropping cached entries", sku);
            self.invalidate(sku).await;
        }
    }

    /// Marks a completed repository write.
    fn bump_generation(&self) {
        self.write_generation.fetch_add(1, Ordering::SeqCst);
    }

    async fn cache_get<T>(&self, key: &str, kind: &'static str) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        match self.cache.get::<T>(key).await {
            Ok(Some(value)) => {
                PricingMetrics::cache_hit(kind);
                Some(value)
            }
            Ok(None) => {
                PricingMetrics::cache_miss(kind);
                None
            }
            Err(e) => {
                warn!("Cache read failed for '{}', treating as miss: {}", key, e);
                PricingMetrics::cache_error("read");
                PricingMetrics::cache_miss(kind);
                None
            }
        }
    }

    async fn cache_set<T>(&self, key: &str, value: &T, ttl: Duration)
    where
        T: Serialize + Send + Sync,
    {
        if let Err(e) = self.cache.set(key, value, ttl).await {
            warn!("Cache write failed for '{}': {}", key, e);
            PricingMetrics::cache_error("write");
        }
    }

    /// Drops the cached baseline and every cached quote for a SKU.
    async fn invalidate(&self, sku: &Sku) {
        if let Err(e) = self.cache.delete(&cache_keys::baseline(sku)).await {
            warn!("Failed to invalidate cached baseline for {}: {}", sku, e);
            PricingMetrics::cache_error("invalidate");
        }
        match self
            .cache
            .delete_pattern(&cache_keys::price_invalidation_pattern(sku))
            .await
        {
            Ok(count) => debug!("Invalidated {} cached quotes for {}", count, sku),
            Err(e) => {
                warn!("Failed to invalidate cached quotes for {}: {}", sku, e);
                PricingMetrics::cache_error("invalidate");
            }
        }
    }
}

#[async_trait]
impl PricingService for PricingServiceImpl {
    async fn quote(&self, query: PriceQuery) -> PricingResult<PriceResponse> {
        debug!("Quoting {} (competitor: {:?})", query.sku, query.competitor_price);

        let started = Instant::now();
        let result = self.quote_inner(query).await;
        let outcome = match &result {
            Ok((_, outcome)) => *outcome,
            Err(PricingError::NotFound { .. }) => QuoteOutcome::NotFound,
            Err(_) => QuoteOutcome::Error,
        };
        PricingMetrics::quote(outcome, started.elapsed());

        result.map(|(response, _)| response)
    }

    async fn upsert_baseline(&self, request: UpsertBaselineRequest) -> PricingResult<UpsertResponse> {
        debug!("Upserting baseline: {}", request.sku);

        request.validate_request()?;
        let sku = Sku::parse(request.sku)?;

        let baseline = SkuBaseline::new(sku.clone(), request.base_price, request.cost)
            .with_inventory(request.inventory)
            .with_competitor_price(request.competitor_price)
            .with_seasonality(request.seasonality);
        baseline.ensure_valid()?;

        self.repository.upsert(&baseline).await?;
        self.bump_generation();
        self.invalidate(&sku).await;
        PricingMetrics::baseline_upserted();

        info!("Baseline upserted: {}", sku);
        Ok(UpsertResponse::upserted(sku.as_str()))
    }

    async fn get_baseline(&self, sku: &str) -> PricingResult<BaselineResponse> {
        debug!("Getting baseline: {}", sku);

        let sku = Sku::parse(sku)?;
        let generation = self.write_generation.load(Ordering::SeqCst);
        let baseline = self.load_baseline(&sku).await?;
        self.discard_if_stale(&sku, generation).await;
        Ok(BaselineResponse::from(baseline))
    }

    async fn list_baselines(&self, page: PageRequest) -> PricingResult<BaselineListResponse> {
        debug!("Listing baselines, page: {}, size: {}", page.page, page.size);

        let baselines = self.repository.find_all(page).await?;
        Ok(BaselineListResponse::from(baselines))
    }

    async fn delete_baseline(&self, sku: &str) -> PricingResult<()> {
        debug!("Deleting baseline: {}", sku);

        let sku = Sku::parse(sku)?;
        if !self.repository.delete(&sku).await? {
            return Err(PricingError::sku_not_found(&sku));
        }
        self.bump_generation();
        self.invalidate(&sku).await;
        PricingMetrics::baseline_deleted();

        info!("Baseline deleted: {}", sku);
        Ok(())
    }
}
