use std::sync::Arc;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::SearchPointsBuilder;
use tracing::{debug, info};

use super::error::VectorDbError;
use super::model::SearchHit;

#[derive(Clone)]
/// Read-only Qdrant client bound to one knowledge-base collection.
pub struct QdrantClient {
    client: Qdrant,
    url: String,
    collection: String,
}

impl std::fmt::Debug for QdrantClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantClient")
            .field("url", &self.url)
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl QdrantClient {
    /// Creates a client for `url` (no network I/O).
    pub fn new(url: &str, collection: &str) -> Result<Self, VectorDbError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| VectorDbError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.to_string(),
        })
    }

    /// Creates a client and verifies the endpoint answers and the collection exists.
    pub async fn connect(url: &str, collection: &str) -> Result<Self, VectorDbError> {
        let client = Self::new(url, collection)?;
        client.health_check().await?;

        if !client.collection_exists().await? {
            return Err(VectorDbError::CollectionNotFound {
                collection: collection.to_string(),
            });
        }

        info!(url = %url, collection = %collection, "Knowledge base connected");
        Ok(client)
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), VectorDbError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Returns `true` if the collection exists.
    pub async fn collection_exists(&self) -> Result<bool, VectorDbError> {
        self.client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })
    }

    /// Nearest-neighbour search, returning hits in backend rank order.
    pub async fn search(&self, query: Vec<f32>, limit: u64) -> Result<Vec<SearchHit>, VectorDbError> {
        let request = SearchPointsBuilder::new(&self.collection, query, limit).with_payload(true);

        let response = self.client.search_points(request).await.map_err(|e| {
            VectorDbError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            }
        })?;

        let hits: Vec<SearchHit> = response
            .result
            .into_iter()
            .map(SearchHit::from_scored_point)
            .collect();

        debug!(hits = hits.len(), limit, "Qdrant search complete");
        Ok(hits)
    }
}

/// Read interface of the knowledge-base index used by retrieval.
pub trait KnowledgeBase: Send + Sync {
    /// Returns up to `limit` hits ordered by ascending distance.
    fn search(
        &self,
        query: Vec<f32>,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>, VectorDbError>> + Send;

    /// Verifies the backend is reachable and the collection is present.
    fn ensure_ready(&self) -> impl std::future::Future<Output = Result<(), VectorDbError>> + Send;
}

impl KnowledgeBase for QdrantClient {
    async fn search(&self, query: Vec<f32>, limit: u64) -> Result<Vec<SearchHit>, VectorDbError> {
        self.search(query, limit).await
    }

    async fn ensure_ready(&self) -> Result<(), VectorDbError> {
        self.health_check().await
    }
}

impl<T: KnowledgeBase> KnowledgeBase for Arc<T> {
    async fn search(&self, query: Vec<f32>, limit: u64) -> Result<Vec<SearchHit>, VectorDbError> {
        (**self).search(query, limit).await
    }

    async fn ensure_ready(&self) -> Result<(), VectorDbError> {
        (**self).ensure_ready().await
    }
}
