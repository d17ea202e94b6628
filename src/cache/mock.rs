use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use super::{CacheError, CacheStore, MemoryStore};

/// Store whose every operation fails.
#[derive(Debug, Default)]
pub struct FailingStore {
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

impl CacheStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Timeout { operation: "get" })
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Operation {
            operation: "set",
            message: "injected failure".to_string(),
        })
    }
}

/// Memory store that records writes.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: Mutex<Vec<(String, Duration)>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(key, ttl)` for every write, in order.
    pub fn writes(&self) -> Vec<(String, Duration)> {
        self.writes.lock().clone()
    }

    /// Seeds a raw value, bypassing the write log.
    pub async fn seed(&self, key: &str, value: &str) {
        let _ = self
            .inner
            .set(key, value.to_string(), Duration::from_secs(60))
            .await;
    }
}

impl CacheStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.writes.lock().push((key.to_string(), ttl));
        self.inner.set(key, value, ttl).await
    }
}
