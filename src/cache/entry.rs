//! Cache Entry Module
//!
//! Defines a single in-memory cache entry with an absolute expiration.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored value and the instant it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Absolute expiration, fixed at write time
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiration.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}
