//! # Priceopt Config
//!
//! Configuration management for the price optimization service.
//! Supports layered configuration from files and environment variables,
//! with runtime refresh.

mod app_config;
mod loader;
pub mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::{format_validation_errors, ConfigValidationError, ConfigValidator};
