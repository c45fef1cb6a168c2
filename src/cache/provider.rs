//! Cache Store: string-keyed get / set-with-expiry / delete-by-pattern.
//!
//! Backends are dispatched through an enum rather than a trait object; the set
//! of backends is closed and known at compile time.

use super::memory::MemoryCacheStore;
use super::redis::RedisCacheStore;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type CacheResult<T> = Result<T, CacheError>;

#[derive(Clone)]
pub enum CacheProvider {
    Memory(MemoryCacheStore),
    Redis(RedisCacheStore),
}

impl CacheProvider {
    pub fn memory() -> Self {
        CacheProvider::Memory(MemoryCacheStore::new())
    }

    /// Redis-backed provider. The connection is opened on first use.
    pub fn redis(url: &str) -> CacheResult<Self> {
        Ok(CacheProvider::Redis(RedisCacheStore::new(url)?))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            CacheProvider::Memory(_) => "memory",
            CacheProvider::Redis(_) => "redis",
        }
    }

    pub async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        match self {
            CacheProvider::Memory(store) => Ok(store.get(key)),
            CacheProvider::Redis(store) => store.get(key).await,
        }
    }

    /// Store `value` under `key`, replacing any prior entry, valid for `ttl`.
    pub async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        match self {
            CacheProvider::Memory(store) => {
                store.set_ex(key, value, ttl);
                Ok(())
            }
            CacheProvider::Redis(store) => store.set_ex(key, value, ttl).await,
        }
    }

    /// Delete every key matching a glob `pattern` (only a trailing `*` is
    /// supported by the memory backend). Returns how many keys were removed.
    pub async fn delete_pattern(&self, pattern: &str) -> CacheResult<usize> {
        match self {
            CacheProvider::Memory(store) => Ok(store.delete_pattern(pattern)),
            CacheProvider::Redis(store) => store.delete_pattern(pattern).await,
        }
    }
}
