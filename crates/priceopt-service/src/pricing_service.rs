//! Pricing service trait definition.

use crate::dto::{
    BaselineListResponse, BaselineResponse, PriceQuery, PriceResponse, UpsertBaselineRequest,
    UpsertResponse,
};
use async_trait::async_trait;
use priceopt_core::{PageRequest, PricingResult};

/// Pricing service trait.
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Returns the optimized price for a SKU.
    ///
    /// Fails with `NotFound` for an unknown SKU and `Validation` for a
    /// malformed SKU or a negative competitor price.
    async fn quote(&self, query: PriceQuery) -> PricingResult<PriceResponse>;

    /// Inserts or replaces a SKU baseline and invalidates its cached entries.
    async fn upsert_baseline(&self, request: UpsertBaselineRequest) -> PricingResult<UpsertResponse>;

    /// Gets the stored baseline for a SKU.
    async fn get_baseline(&self, sku: &str) -> PricingResult<BaselineResponse>;

    /// Lists baselines ordered by SKU.
    async fn list_baselines(&self, page: PageRequest) -> PricingResult<BaselineListResponse>;

    /// Deletes a SKU baseline and invalidates its cached entries.
    async fn delete_baseline(&self, sku: &str) -> PricingResult<()>;
}
