use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::{CacheBackendKind, CacheConfig, CacheError, MemoryStore, RedisStore};

/// String key/value store with per-entry TTL.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, CacheError>> + Send;

    fn set(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;

    /// `false` for a store that never holds anything.
    fn is_enabled(&self) -> bool {
        true
    }
}

impl<T: CacheStore> CacheStore for Arc<T> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, CacheError>> + Send {
        (**self).get(key)
    }

    fn set(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), CacheError>> + Send {
        (**self).set(key, value, ttl)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

/// The store selected by [`CacheConfig::backend`].
#[derive(Debug)]
pub enum CacheBackend {
    Redis(RedisStore),
    Memory(MemoryStore),
    Disabled,
}

impl CacheBackend {
    /// Opens the configured store. A redis endpoint that cannot be reached within the
    /// timeout yields [`CacheBackend::Disabled`].
    pub async fn open(config: &CacheConfig) -> Self {
        match config.backend {
            CacheBackendKind::Disabled => {
                info!("Response cache disabled");
                CacheBackend::Disabled
            }
            CacheBackendKind::Memory => {
                info!(capacity = config.memory_capacity, "Using in-memory response cache");
                CacheBackend::Memory(MemoryStore::new(config.memory_capacity))
            }
            CacheBackendKind::Redis => {
                let Some(url) = config.redis_url.as_deref() else {
                    warn!("Redis cache selected without a URL; cache disabled");
                    return CacheBackend::Disabled;
                };
                match RedisStore::connect(url, config.timeout).await {
                    Ok(store) => {
                        info!("Connected to redis response cache");
                        CacheBackend::Redis(store)
                    }
                    Err(e) => {
                        warn!(error = %e, "Redis unavailable; response cache disabled");
                        CacheBackend::Disabled
                    }
                }
            }
        }
    }

    pub fn kind(&self) -> CacheBackendKind {
        match self {
            CacheBackend::Redis(_) => CacheBackendKind::Redis,
            CacheBackend::Memory(_) => CacheBackendKind::Memory,
            CacheBackend::Disabled => CacheBackendKind::Disabled,
        }
    }
}

impl CacheStore for CacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            CacheBackend::Redis(store) => store.get(key).await,
            CacheBackend::Memory(store) => store.get(key).await,
            CacheBackend::Disabled => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        match self {
            CacheBackend::Redis(store) => store.set(key, value, ttl).await,
            CacheBackend::Memory(store) => store.set(key, value, ttl).await,
            CacheBackend::Disabled => Ok(()),
        }
    }

    fn is_enabled(&self) -> bool {
        !matches!(self, CacheBackend::Disabled)
    }
}
