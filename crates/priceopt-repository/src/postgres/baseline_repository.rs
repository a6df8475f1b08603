//! PostgreSQL baseline repository implementation.

use crate::{traits::BaselineRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use priceopt_core::{Page, PageRequest, PricingError, PricingResult, Sku, SkuBaseline};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL baseline repository implementation.
#[derive(Clone)]
pub struct PgBaselineRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgBaselineRepository {
    /// Creates a new PostgreSQL baseline repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a baseline.
#[derive(Debug, FromRow)]
struct BaselineRow {
    sku: String,
    base_price: f64,
    cost: f64,
    inventory: i64,
    competitor_price: Option<f64>,
    seasonality: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BaselineRow> for SkuBaseline {
    type Error = PricingError;

    fn try_from(row: BaselineRow) -> Result<Self, Self::Error> {
        let sku = Sku::parse(row.sku)
            .map_err(|e| PricingError::Internal(format!("Invalid SKU in database: {}", e)))?;

        Ok(SkuBaseline {
            sku,
            base_price: row.base_price,
            cost: row.cost,
            inventory: row.inventory,
            competitor_price: row.competitor_price,
            seasonality: row.seasonality,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl BaselineRepository for PgBaselineRepository {
    async fn find_by_sku(&self, sku: &Sku) -> PricingResult<Option<SkuBaseline>> {
        debug!("Finding baseline by sku: {}", sku);

        let row = sqlx::query_as::<_, BaselineRow>(
            r#"
            SELECT sku, base_price, cost, inventory, competitor_price,
                   seasonality, created_at, updated_at
            FROM sku_baselines
            WHERE sku = $1
            "#,
        )
        .bind(sku.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(SkuBaseline::try_from).transpose()
    }

    async fn upsert(&self, baseline: &SkuBaseline) -> PricingResult<SkuBaseline> {
        debug!("Upserting baseline: {}", baseline.sku);

        let row = sqlx::query_as::<_, BaselineRow>(
            r#"
            INSERT INTO sku_baselines
                (sku, base_price, cost, inventory, competitor_price,
                 seasonality, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (sku) DO UPDATE SET
                base_price = EXCLUDED.base_price,
                cost = EXCLUDED.cost,
                inventory = EXCLUDED.inventory,
                competitor_price = EXCLUDED.competitor_price,
                seasonality = EXCLUDED.seasonality,
                updated_at = EXCLUDED.updated_at
            RETURNING sku, base_price, cost, inventory, competitor_price,
                      seasonality, created_at, updated_at
            "#,
        )
        .bind(baseline.sku.as_str())
        .bind(baseline.base_price)
        .bind(baseline.cost)
        .bind(baseline.inventory)
        .bind(baseline.competitor_price)
        .bind(baseline.seasonality)
        .bind(baseline.created_at)
        .bind(baseline.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        SkuBaseline::try_from(row)
    }

    async fn delete(&self, sku: &Sku) -> PricingResult<bool> {
        debug!("Deleting baseline: {}", sku);

        let result = sqlx::query("DELETE FROM sku_baselines WHERE sku = $1")
            .bind(sku.as_str())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self, page: PageRequest) -> PricingResult<Page<SkuBaseline>> {
        debug!("Finding all baselines, page: {}, size: {}", page.page, page.size);

        let total = self.count().await?;

        let rows = sqlx::query_as::<_, BaselineRow>(
            r#"
            SELECT sku, base_price, cost, inventory, competitor_price,
                   seasonality, created_at, updated_at
            FROM sku_baselines
            ORDER BY sku
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool.inner())
        .await?;

        let baselines = rows
            .into_iter()
            .map(SkuBaseline::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(baselines, page, total))
    }

    async fn count(&self) -> PricingResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sku_baselines")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(total.max(0) as u64)
    }
}
