//! Domain model: SKUs and their pricing baselines.

mod baseline;
mod sku;

pub use baseline::*;
pub use sku::*;
