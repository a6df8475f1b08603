//! Pricing service implementations.
//!
//! Trait definitions live in the parent module (`pricing_service.rs`).

pub mod pricing_service_impl;

pub use pricing_service_impl::PricingServiceImpl;
