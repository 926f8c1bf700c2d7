//! Cache Module
//!
//! Key-value stores with per-entry absolute expiration, shared process-wide.

mod entry;
mod memory;
mod redis_store;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use redis_store::RedisCache;

// == Public Constants ==
/// Lifetime of every cached catalog document
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

// == Cache Store ==
/// String-valued store with absolute expiry.
///
/// `set` is an unconditional overwrite; concurrent writers for the same key
/// race and the last one wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, expiring `ttl` from now.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}
