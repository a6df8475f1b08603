//! Repository trait definitions.

use async_trait::async_trait;
use priceopt_core::{Page, PageRequest, PricingResult, Sku, SkuBaseline};

/// Baseline repository trait.
///
/// Implementations must make `upsert` atomic per SKU; concurrent writers
/// resolve as last writer wins.
#[async_trait]
pub trait BaselineRepository: Send + Sync {
    /// Finds the baseline for a SKU.
    async fn find_by_sku(&self, sku: &Sku) -> PricingResult<Option<SkuBaseline>>;

    /// Inserts or replaces a baseline, keeping the original `created_at` of an
    /// existing row. Returns the stored baseline.
    async fn upsert(&self, baseline: &SkuBaseline) -> PricingResult<SkuBaseline>;

    /// Deletes a baseline. Returns false when the SKU was unknown.
    async fn delete(&self, sku: &Sku) -> PricingResult<bool>;

    /// Lists baselines ordered by SKU.
    async fn find_all(&self, page: PageRequest) -> PricingResult<Page<SkuBaseline>>;

    /// Counts stored baselines.
    async fn count(&self) -> PricingResult<u64>;
}
