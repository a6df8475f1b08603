//! Price prediction models.

use priceopt_config::ModelConfig;

/// Predicts an unconstrained price from baseline inputs.
///
/// Implementations must be deterministic so concurrent cache fills for the
/// same key store the same value.
pub trait PriceModel: Send + Sync {
    /// Model name, for logs.
    fn name(&self) -> &str;

    /// Predicts a price before business rules are applied.
    fn predict(&self, base_price: f64, competitor_price: f64, inventory: i64) -> f64;
}

/// Rule-of-thumb model: a small premium when the competitor is dearer, a
/// small discount otherwise, and an extra discount when overstocked.
#[derive(Debug, Clone, Default)]
pub struct HeuristicPriceModel {
    config: ModelConfig,
}

impl HeuristicPriceModel {
    /// Creates the model with the given parameters.
    #[must_use]
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }
}

impl PriceModel for HeuristicPriceModel {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn predict(&self, base_price: f64, competitor_price: f64, inventory: i64) -> f64 {
        let premium = if competitor_price > base_price {
            self.config.premium_pct
        } else {
            -self.config.discount_pct
        };
        let inventory_discount = if inventory > self.config.inventory_threshold {
            -self.config.inventory_discount_pct
        } else {
            0.0
        };
        base_price * (1.0 + premium + inventory_discount)
    }
}
