//! Process-local repositories.

mod baseline_repository;

pub use baseline_repository::InMemoryBaselineRepository;
