//! Result type aliases for the pricing service.

use crate::PricingError;

/// A specialized `Result` type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;
