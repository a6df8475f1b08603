//! Business rules applied on top of the model prediction.

use priceopt_config::RulesConfig;
use priceopt_core::SkuBaseline;

/// Rounds a price to cents, half away from zero.
#[must_use]
pub fn round_price(price: f64) -> f64 {
    let scaled = price * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        price
    }
}

/// Ordered business rules.
///
/// Rules run in a fixed order and later rules win, so a competitor cap,
/// clearance or hard maximum may take the price below the margin floor.
#[derive(Debug, Clone, Default)]
pub struct PricingRules {
    config: RulesConfig,
}

impl PricingRules {
    /// Creates the rule set.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    /// Returns the rule parameters.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Applies the rules to a predicted price.
    ///
    /// `requested_competitor_price` is the price supplied with the request;
    /// the competitor cap only applies when one was given.
    #[must_use]
    pub fn apply(
        &self,
        predicted: f64,
        baseline: &SkuBaseline,
        requested_competitor_price: Option<f64>,
    ) -> f64 {
        let rules = &self.config;

        // 1. margin floor
        let floor = (baseline.cost * (1.0 + rules.min_margin_pct))
            .max(rules.min_price.unwrap_or(0.0));
        let mut price = predicted.max(floor);

        // 2. competitor cap
        if let Some(competitor) = requested_competitor_price {
            price = price.min(competitor * (1.0 + rules.max_above_competitor_pct));
        }

        // 3. clearance
        if baseline.inventory > rules.clearance_inventory {
            price = price.min(baseline.base_price * (1.0 - rules.clearance_discount_pct));
        }

        // 4. hard cap
        if let Some(max_price) = rules.max_price {
            price = price.min(max_price);
        }

        round_price(price)
    }
}
