//! In-memory baseline repository.

use crate::traits::BaselineRepository;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use priceopt_core::{
    HealthCheck, HealthStatus, Page, PageRequest, PricingResult, Sku, SkuBaseline,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Process-local baseline store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryBaselineRepository {
    baselines: RwLock<BTreeMap<Sku, SkuBaseline>>,
}

impl InMemoryBaselineRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the given baselines.
    #[must_use]
    pub fn with_baselines(baselines: impl IntoIterator<Item = SkuBaseline>) -> Self {
        let map = baselines
            .into_iter()
            .map(|b| (b.sku.clone(), b))
            .collect();
        Self {
            baselines: RwLock::new(map),
        }
    }

    /// Creates a repository seeded with the demo baseline.
    #[must_use]
    pub fn seeded() -> Self {
        info!("Seeding in-memory store with demo baseline");
        Self::with_baselines([SkuBaseline::demo()])
    }
}

#[async_trait]
impl BaselineRepository for InMemoryBaselineRepository {
    async fn find_by_sku(&self, sku: &Sku) -> PricingResult<Option<SkuBaseline>> {
        debug!("Finding baseline by sku: {}", sku);
        Ok(self.baselines.read().get(sku).cloned())
    }

    async fn upsert(&self, baseline: &SkuBaseline) -> PricingResult<SkuBaseline> {
        debug!("Upserting baseline: {}", baseline.sku);
        let mut baselines = self.baselines.write();
        let stored = match baselines.get_mut(&baseline.sku) {
            Some(existing) => {
                existing.apply_update(baseline.clone());
                existing.clone()
            }
            None => {
                let mut fresh = baseline.clone();
                fresh.updated_at = Utc::now();
                baselines.insert(fresh.sku.clone(), fresh.clone());
                fresh
            }
        };
        Ok(stored)
    }

    async fn delete(&self, sku: &Sku) -> PricingResult<bool> {
        debug!("Deleting baseline: {}", sku);
        Ok(self.baselines.write().remove(sku).is_some())
    }

    async fn find_all(&self, page: PageRequest) -> PricingResult<Page<SkuBaseline>> {
        let baselines = self.baselines.read();
        let total = baselines.len() as u64;
        let content = baselines
            .values()
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect();
        Ok(Page::new(content, page, total))
    }

    async fn count(&self) -> PricingResult<u64> {
        Ok(self.baselines.read().len() as u64)
    }
}

#[async_trait]
impl HealthCheck for InMemoryBaselineRepository {
    fn name(&self) -> &str {
        "store"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(value: &str) -> Sku {
        Sku::parse(value).unwrap()
    }

    fn baseline(value: &str, base_price: f64) -> SkuBaseline {
        SkuBaseline::new(sku(value), base_price, base_price * 0.7)
    }

    #[tokio::test]
    async fn test_seeded_contains_demo() {
        let repo = InMemoryBaselineRepository::seeded();
        let found = repo.find_by_sku(&sku("SKU123")).await.unwrap().unwrap();
        assert_eq!(found.base_price, 100.0);
        assert_eq!(found.cost, 70.0);
        assert_eq!(found.inventory, 800);
        assert_eq!(found.competitor_price, Some(110.0));
    }

    #[tokio::test]
    async fn test_find_unknown_returns_none() {
        let repo = InMemoryBaselineRepository::new();
        assert!(repo.find_by_sku(&sku("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let repo = InMemoryBaselineRepository::seeded();
        assert!(repo.find_by_sku(&sku("sku123")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_replaces() {
        let repo = InMemoryBaselineRepository::new();
        let first = repo.upsert(&baseline("A1", 10.0)).await.unwrap();

        let replacement = baseline("A1", 12.0).with_inventory(5);
        let second = repo.upsert(&replacement).await.unwrap();

        assert_eq!(second.base_price, 12.0);
        assert_eq!(second.inventory, 5);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryBaselineRepository::seeded();
        assert!(repo.delete(&sku("SKU123")).await.unwrap());
        assert!(!repo.delete(&sku("SKU123")).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_all_ordered_and_paged() {
        let repo = InMemoryBaselineRepository::with_baselines([
            baseline("C", 3.0),
            baseline("A", 1.0),
            baseline("B", 2.0),
        ]);

        let first = repo.find_all(PageRequest::new(0, 2)).await.unwrap();
        let skus: Vec<_> = first.content.iter().map(|b| b.sku.to_string()).collect();
        assert_eq!(skus, vec!["A", "B"]);
        assert_eq!(first.total_elements, 3);
        assert_eq!(first.total_pages, 2);

        let second = repo.find_all(PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(second.content.len(), 1);
        assert_eq!(second.content[0].sku.as_str(), "C");

        let beyond = repo.find_all(PageRequest::new(5, 2)).await.unwrap();
        assert!(beyond.content.is_empty());
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = InMemoryBaselineRepository::new();
        assert_eq!(repo.name(), "store");
        assert!(repo.check().await.is_healthy());
    }
}
