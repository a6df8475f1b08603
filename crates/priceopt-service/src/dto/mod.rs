//! Data Transfer Objects (DTOs).

mod baseline_dto;
mod price_dto;

pub use baseline_dto::*;
pub use price_dto::*;
