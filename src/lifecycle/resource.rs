use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheError, CacheStore};
use crate::embedding::{EmbeddingError, TextEmbedder};
use crate::vectordb::{KnowledgeBase, SearchHit, VectorDbError};

/// A process-wide handle opened from configuration on first use.
pub trait Resource: Sized + Send + Sync + 'static {
    type Config: Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Name used in logs.
    const NAME: &'static str;

    fn open(config: &Self::Config) -> impl Future<Output = Result<Self, Self::Error>> + Send;
}

/// Lazily initialized, explicitly released shared handle.
///
/// The first [`get`](Self::get) opens the resource; concurrent callers wait on the init lock
/// and reuse the result, so `open` runs at most once per live slot. A failed or cancelled
/// open leaves the slot empty and the next caller retries. [`teardown`](Self::teardown)
/// empties the slot; callers already holding an `Arc` keep a usable handle.
pub struct SharedResource<T: Resource> {
    config: T::Config,
    slot: RwLock<Option<Arc<T>>>,
    init: Mutex<()>,
}

impl<T: Resource> std::fmt::Debug for SharedResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedResource")
            .field("name", &T::NAME)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl<T: Resource> SharedResource<T> {
    pub fn new(config: T::Config) -> Self {
        Self {
            config,
            slot: RwLock::new(None),
            init: Mutex::new(()),
        }
    }

    /// Starts out holding `instance`; `open` only runs again after a teardown.
    pub fn with_instance(config: T::Config, instance: T) -> Self {
        Self {
            config,
            slot: RwLock::new(Some(Arc::new(instance))),
            init: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &T::Config {
        &self.config
    }

    /// The live handle, without initializing.
    pub fn current(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.read().is_some()
    }

    pub async fn get(&self) -> Result<Arc<T>, T::Error> {
        if let Some(resource) = self.current() {
            return Ok(resource);
        }

        let _guard = self.init.lock().await;
        if let Some(resource) = self.current() {
            return Ok(resource);
        }

        let started = Instant::now();
        let resource = Arc::new(T::open(&self.config).await?);
        *self.slot.write() = Some(Arc::clone(&resource));

        info!(
            resource = T::NAME,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Resource initialized"
        );
        Ok(resource)
    }

    /// Releases the handle. Returns `true` if one was live.
    pub async fn teardown(&self) -> bool {
        let _guard = self.init.lock().await;
        let released = self.slot.write().take();

        match released {
            Some(resource) => {
                debug!(
                    resource = T::NAME,
                    outstanding = Arc::strong_count(&resource) - 1,
                    "Resource released"
                );
                true
            }
            None => false,
        }
    }
}

impl<T> TextEmbedder for SharedResource<T>
where
    T: Resource<Error = EmbeddingError> + TextEmbedder,
{
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.get().await?.embed(text).await
    }
}

impl<T> KnowledgeBase for SharedResource<T>
where
    T: Resource<Error = VectorDbError> + KnowledgeBase,
{
    async fn search(&self, query: Vec<f32>, limit: u64) -> Result<Vec<SearchHit>, VectorDbError> {
        self.get().await?.search(query, limit).await
    }

    async fn ensure_ready(&self) -> Result<(), VectorDbError> {
        self.get().await?.ensure_ready().await
    }
}

impl<T> CacheStore for SharedResource<T>
where
    T: Resource<Error = CacheError> + CacheStore,
{
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        SharedResource::get(self).await?.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        SharedResource::get(self).await?.set(key, value, ttl).await
    }

    fn is_enabled(&self) -> bool {
        self.current().is_none_or(|store| store.is_enabled())
    }
}
