//! Caching infrastructure for the service layer.
//!
//! A cache abstraction with a Redis implementation, used for read-through
//! caching of product listings and top-product rankings.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::{create_redis_pool, RedisCacheService, RedisCacheServiceParameters, CACHE_TTL};
