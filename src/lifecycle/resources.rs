use std::sync::Arc;

use tracing::info;

use super::{Resource, SharedResource};
use crate::cache::{CacheBackend, CacheConfig, CacheError};
use crate::config::Config;
use crate::embedding::{Embedder, EmbeddingConfig, EmbeddingError};
use crate::vectordb::{QdrantClient, VectorDbError};

/// Where the knowledge-base collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBaseConfig {
    pub url: String,
    pub collection: String,
}

impl Resource for Embedder {
    type Config = EmbeddingConfig;
    type Error = EmbeddingError;
    const NAME: &'static str = "embedder";

    async fn open(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let config = config.clone();
        tokio::task::spawn_blocking(move || Embedder::load(config))
            .await
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("embedder load task failed: {e}"),
            })?
    }
}

impl Resource for QdrantClient {
    type Config = KnowledgeBaseConfig;
    type Error = VectorDbError;
    const NAME: &'static str = "knowledge_base";

    async fn open(config: &KnowledgeBaseConfig) -> Result<Self, VectorDbError> {
        QdrantClient::connect(&config.url, &config.collection).await
    }
}

impl Resource for CacheBackend {
    type Config = CacheConfig;
    type Error = CacheError;
    const NAME: &'static str = "cache";

    async fn open(config: &CacheConfig) -> Result<Self, CacheError> {
        Ok(CacheBackend::open(config).await)
    }
}

/// The three process-wide handles. Building this does no I/O.
#[derive(Debug, Clone)]
pub struct Resources {
    pub embedder: Arc<SharedResource<Embedder>>,
    pub knowledge_base: Arc<SharedResource<QdrantClient>>,
    pub cache: Arc<SharedResource<CacheBackend>>,
}

impl Resources {
    pub fn from_config(config: &Config) -> Self {
        Self {
            embedder: Arc::new(SharedResource::new(config.embedding.clone())),
            knowledge_base: Arc::new(SharedResource::new(KnowledgeBaseConfig {
                url: config.qdrant_url.clone(),
                collection: config.collection.clone(),
            })),
            cache: Arc::new(SharedResource::new(config.cache.clone())),
        }
    }

    /// Releases every initialized handle.
    pub async fn teardown(&self) {
        let embedder = self.embedder.teardown().await;
        let knowledge_base = self.knowledge_base.teardown().await;
        let cache = self.cache.teardown().await;

        info!(embedder, knowledge_base, cache, "Shared resources released");
    }
}
