//! Redis cache store
//!
//! Shared `CacheStore` backed by a deadpool-redis connection pool. Keys are
//! namespaced with the configured instance name.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, Pool, Runtime};
use redis::AsyncCommands;
use tracing::debug;

use crate::cache::CacheStore;
use crate::error::CacheError;

#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
    instance_name: String,
}

impl RedisCache {
    pub fn new(pool: Pool, instance_name: impl Into<String>) -> Self {
        Self {
            pool,
            instance_name: instance_name.into(),
        }
    }

    /// Builds a pool for `url`. No connection is opened until first use.
    pub fn connect(url: &str, instance_name: impl Into<String>) -> Result<Self, CacheError> {
        let pool = PoolConfig::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::Pool(e.to_string()))?;
        Ok(Self::new(pool, instance_name))
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.instance_name, key)
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let key = self.namespaced(key);
        let mut conn = self.pool.get().await?;
        let value: Option<String> = conn.get(&key).await?;
        debug!(key = %key, found = value.is_some(), "redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let key = self.namespaced(key);
        let mut conn = self.pool.get().await?;
        // SETEX rejects a zero expiry
        let ttl_secs = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(&key, value, ttl_secs).await?;
        debug!(key = %key, ttl_secs, "redis SETEX");
        Ok(())
    }
}
