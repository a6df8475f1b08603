//! Price computation: a predictive model followed by business rules.

mod model;
mod rules;

pub use model::{HeuristicPriceModel, PriceModel};
pub use rules::{round_price, PricingRules};
