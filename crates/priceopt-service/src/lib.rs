//! # Priceopt Service
//!
//! Pricing logic for the price optimization service: the price model,
//! business rules, cache-aside quote lookup and baseline management.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod metrics;
pub mod pricing;
pub mod pricing_service;

pub use cache::*;
pub use dto::*;
pub use pricing::*;
pub use pricing_service::*;
pub use r#impl::PricingServiceImpl;
