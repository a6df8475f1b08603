//! PostgreSQL-backed repositories.

mod baseline_repository;

pub use baseline_repository::PgBaselineRepository;
