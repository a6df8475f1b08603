//! SKU baseline entity.

use super::Sku;
use crate::{validation::rules, PricingError, PricingResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default seasonality multiplier for a new baseline.
pub const DEFAULT_SEASONALITY: f64 = 1.0;

/// Persisted pricing inputs for one SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuBaseline {
    /// Product identifier.
    pub sku: Sku,
    /// List price before optimization.
    pub base_price: f64,
    /// Unit cost, used for the margin floor.
    pub cost: f64,
    /// Units on hand.
    pub inventory: i64,
    /// Last known competitor price, if any.
    pub competitor_price: Option<f64>,
    /// Seasonality multiplier. Stored for future models; not used in pricing.
    pub seasonality: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl SkuBaseline {
    /// Creates a baseline with zero inventory, no competitor price and
    /// neutral seasonality.
    #[must_use]
    pub fn new(sku: Sku, base_price: f64, cost: f64) -> Self {
        let now = Utc::now();
        Self {
            sku,
            base_price,
            cost,
            inventory: 0,
            competitor_price: None,
            seasonality: DEFAULT_SEASONALITY,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the inventory level.
    #[must_use]
    pub fn with_inventory(mut self, inventory: i64) -> Self {
        self.inventory = inventory;
        self
    }

    /// Sets the stored competitor price.
    #[must_use]
    pub fn with_competitor_price(mut self, competitor_price: Option<f64>) -> Self {
        self.competitor_price = competitor_price;
        self
    }

    /// Sets the seasonality multiplier.
    #[must_use]
    pub fn with_seasonality(mut self, seasonality: f64) -> Self {
        self.seasonality = seasonality;
        self
    }

    /// The demo baseline the in-memory store is seeded with.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(Sku::new_unchecked("SKU123"), 100.0, 70.0)
            .with_inventory(800)
            .with_competitor_price(Some(110.0))
    }

    /// Competitor price the model should compare against.
    ///
    /// Prefers the caller-supplied price, then the stored one, then the base
    /// price itself.
    #[must_use]
    pub fn reference_competitor_price(&self, requested: Option<f64>) -> f64 {
        requested
            .or(self.competitor_price)
            .unwrap_or(self.base_price)
    }

    /// Checks the numeric invariants of the baseline.
    pub fn ensure_valid(&self) -> PricingResult<()> {
        let check = |field: &str, value: f64| {
            rules::non_negative_amount(value)
                .map_err(|e| PricingError::validation(format!("{}: {}", field, e.code)))
        };

        check("base_price", self.base_price)?;
        check("cost", self.cost)?;
        check("seasonality", self.seasonality)?;
        if let Some(competitor_price) = self.competitor_price {
            check("competitor_price", competitor_price)?;
        }
        if self.inventory < 0 {
            return Err(PricingError::validation("inventory: must be non-negative"));
        }
        Ok(())
    }

    /// Replaces the mutable fields with those of `other`, keeping the
    /// original creation time.
    pub fn apply_update(&mut self, other: SkuBaseline) {
        self.base_price = other.base_price;
        self.cost = other.cost;
        self.inventory = other.inventory;
        self.competitor_price = other.competitor_price;
        self.seasonality = other.seasonality;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> SkuBaseline {
        SkuBaseline::new(Sku::parse("SKU1").unwrap(), 100.0, 70.0)
    }

    #[test]
    fn test_defaults() {
        let b = baseline();
        assert_eq!(b.inventory, 0);
        assert_eq!(b.competitor_price, None);
        assert_eq!(b.seasonality, DEFAULT_SEASONALITY);
        assert_eq!(b.created_at, b.updated_at);
    }

    #[test]
    fn test_reference_competitor_price_precedence() {
        let b = baseline().with_competitor_price(Some(110.0));
        assert_eq!(b.reference_competitor_price(Some(95.0)), 95.0);
        assert_eq!(b.reference_competitor_price(None), 110.0);

        let no_comp = baseline();
        assert_eq!(no_comp.reference_competitor_price(None), 100.0);
    }

    #[test]
    fn test_ensure_valid() {
        assert!(baseline().ensure_valid().is_ok());
        assert!(baseline().with_inventory(-1).ensure_valid().is_err());
        assert!(baseline().with_competitor_price(Some(-5.0)).ensure_valid().is_err());

        let mut bad = baseline();
        bad.cost = f64::NAN;
        assert!(bad.ensure_valid().is_err());
    }

    #[test]
    fn test_apply_update_keeps_created_at() {
        let mut original = baseline();
        let created_at = original.created_at;
        let update = baseline().with_inventory(42).with_seasonality(1.2);

        original.apply_update(update);

        assert_eq!(original.inventory, 42);
        assert_eq!(original.seasonality, 1.2);
        assert_eq!(original.created_at, created_at);
        assert!(original.updated_at >= created_at);
    }

    #[test]
    fn test_demo_baseline() {
        let demo = SkuBaseline::demo();
        assert_eq!(demo.sku.as_str(), "SKU123");
        assert_eq!(demo.inventory, 800);
        assert_eq!(demo.competitor_price, Some(110.0));
    }
}
