//! Baseline DTOs.

use chrono::{DateTime, Utc};
use priceopt_core::validation::rules::valid_sku;
use priceopt_core::{Page, SkuBaseline, DEFAULT_SEASONALITY};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn default_seasonality() -> f64 {
    DEFAULT_SEASONALITY
}

/// Request to insert or replace a SKU baseline.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertBaselineRequest {
    #[validate(custom(function = "valid_sku"))]
    pub sku: String,

    #[validate(range(min = 0.0, message = "base_price must be non-negative"))]
    pub base_price: f64,

    #[validate(range(min = 0.0, message = "cost must be non-negative"))]
    pub cost: f64,

    #[serde(default)]
    #[validate(range(min = 0, message = "inventory must be non-negative"))]
    pub inventory: i64,

    #[validate(range(min = 0.0, message = "competitor_price must be non-negative"))]
    pub competitor_price: Option<f64>,

    #[serde(default = "default_seasonality")]
    #[validate(range(min = 0.0, message = "seasonality must be non-negative"))]
    pub seasonality: f64,
}

/// Acknowledgement of an upsert.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertResponse {
    pub status: String,
    pub message: String,
}

impl UpsertResponse {
    /// Builds the acknowledgement for a SKU.
    #[must_use]
    pub fn upserted(sku: &str) -> Self {
        Self {
            status: "ok".to_string(),
            message: format!("Baseline upserted for {}", sku),
        }
    }
}

/// Stored baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BaselineResponse {
    pub sku: String,
    pub base_price: f64,
    pub cost: f64,
    pub inventory: i64,
    pub competitor_price: Option<f64>,
    pub seasonality: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SkuBaseline> for BaselineResponse {
    fn from(baseline: SkuBaseline) -> Self {
        Self {
            sku: baseline.sku.into(),
            base_price: baseline.base_price,
            cost: baseline.cost,
            inventory: baseline.inventory,
            competitor_price: baseline.competitor_price,
            seasonality: baseline.seasonality,
            created_at: baseline.created_at,
            updated_at: baseline.updated_at,
        }
    }
}

/// Baseline list response with pagination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BaselineListResponse {
    pub baselines: Vec<BaselineResponse>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<Page<SkuBaseline>> for BaselineListResponse {
    fn from(page: Page<SkuBaseline>) -> Self {
        let page = page.map(BaselineResponse::from);
        Self {
            baselines: page.content,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        }
    }
}
