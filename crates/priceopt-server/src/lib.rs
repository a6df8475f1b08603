//! # Priceopt Server Library
//!
//! Wiring for the price optimization server: builds the baseline store,
//! cache, pricing service and router from configuration, and sets up
//! logging and metrics.

pub mod app;
pub mod startup;
pub mod telemetry;
