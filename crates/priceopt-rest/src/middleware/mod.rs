//! HTTP middleware.

mod logging;
mod timeout;

pub use logging::*;
pub use timeout::*;
