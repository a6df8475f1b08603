//! REST API controllers.

pub mod baseline_controller;
pub mod health_controller;
pub mod metrics_controller;
pub mod price_controller;

pub use health_controller::*;
