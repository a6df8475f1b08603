//! # Priceopt Repository
//!
//! Baseline persistence behind the [`BaselineRepository`] trait:
//!
//! ```text
//! PricingService
//!   ↓  Arc<dyn BaselineRepository>
//! PgBaselineRepository          (PostgreSQL / SQLx)
//! InMemoryBaselineRepository    (process-local, for development and tests)
//! ```

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

pub use memory::InMemoryBaselineRepository;
pub use pool::*;
pub use postgres::PgBaselineRepository;
pub use traits::*;
