//! # Priceopt REST
//!
//! REST API layer using Axum for the price optimization service.
//! Provides HTTP endpoints for price quotes, baseline management, health
//! checks and Prometheus metrics.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
