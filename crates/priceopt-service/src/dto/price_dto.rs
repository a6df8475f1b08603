//! Price quote DTOs.

use priceopt_core::validation::rules::valid_sku;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request for a price quote, as a query string or JSON body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    /// Product SKU.
    #[validate(custom(function = "valid_sku"))]
    pub sku: String,

    /// Latest competitor price. Enables the competitor cap when present.
    #[validate(range(min = 0.0, message = "competitor_price must be non-negative"))]
    pub competitor_price: Option<f64>,
}

impl PriceQuery {
    /// Creates a quote request.
    #[must_use]
    pub fn new(sku: impl Into<String>, competitor_price: Option<f64>) -> Self {
        Self {
            sku: sku.into(),
            competitor_price,
        }
    }
}

/// Optimized price for a SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceResponse {
    pub sku: String,
    pub price: f64,
}
