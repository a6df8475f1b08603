//! # Priceopt Core
//!
//! Core types, traits, and error definitions for the price optimization
//! service. Every other crate in the workspace builds on the error type,
//! the result alias and the SKU baseline domain defined here.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
pub use validation::*;
