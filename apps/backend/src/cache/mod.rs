//! Read-through cache for game records.
//!
//! The cache is an optimization only: every read falls back to the database
//! and every failure is logged and treated as a miss. Values are JSON.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub mod keys;
pub mod memory;
pub mod redis_cache;

pub use keys::{CacheKey, LONG_TTL, SHORT_TTL};
pub use memory::MokaCache;
pub use redis_cache::RedisCache;

use crate::config::cache::CacheKind;
use crate::error::AppError;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
    #[error("cache codec error: {0}")]
    Codec(String),
}

/// Byte-oriented key/value store with per-entry expiry.
#[async_trait]
pub trait GameCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;
    /// Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

pub type SharedCache = Arc<dyn GameCache>;

/// Cache that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl GameCache for NoopCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }
}

pub async fn build_cache(kind: &CacheKind) -> Result<SharedCache, AppError> {
    Ok(match kind {
        CacheKind::Memory { capacity } => Arc::new(MokaCache::new(*capacity)),
        CacheKind::Redis { url } => Arc::new(RedisCache::connect(url).await?),
        CacheKind::None => Arc::new(NoopCache),
    })
}

/// Fetch and decode `key`. Errors and undecodable values count as a miss.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn GameCache, key: &CacheKey) -> Option<T> {
    let bytes = match cache.get(key.as_str()).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!(key = %key, "cache miss");
            return None;
        }
        Err(e) => {
            debug!(key = %key, error = %e, "cache read failed; treating as miss");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(key = %key, error = %e, "cached value failed to decode; treating as miss");
            None
        }
    }
}

/// Encode and store `value`. Failures are logged and dropped.
pub async fn set_json<T: Serialize>(
    cache: &dyn GameCache,
    key: &CacheKey,
    value: &T,
    ttl: Duration,
) {
    let bytes = match serde_json::to_vec(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(key = %key, error = %e, "cache encode failed");
            return;
        }
    };
    if let Err(e) = cache.set(key.as_str(), bytes, ttl).await {
        debug!(key = %key, error = %e, "cache write failed");
    }
}

/// Best-effort removal of `keys`. Returns the number of failed deletes.
pub async fn delete_all(cache: &dyn GameCache, keys: &[CacheKey]) -> usize {
    let mut failures = 0;
    for key in keys {
        if let Err(e) = cache.delete(key.as_str()).await {
            warn!(key = %key, error = %e, "cache delete failed");
            failures += 1;
        }
    }
    failures
}
