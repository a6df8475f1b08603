//! Caching infrastructure for the service layer.
//!
//! Provides a cache abstraction with Redis and in-process implementations.
//! Quotes and baselines are cached cache-aside by [`crate::PricingServiceImpl`].

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::InMemoryCache;
pub use redis_cache::{RedisCacheService, BASELINE_TTL, DEFAULT_TTL};
