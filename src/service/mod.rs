//! The `/ask` pipeline: normalize, cache lookup, retrieve, route, cache store.

pub mod ask;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use ask::{AskPipeline, AskService};
pub use error::AskError;
pub use types::{AskOutcome, AskRequest, AskResponse};

use std::sync::Arc;

use crate::cache::{CacheBackend, ResponseCache};
use crate::config::Config;
use crate::embedding::Embedder;
use crate::generation::{ChatCompletionGenerator, FallbackGenerator};
use crate::lifecycle::{Resources, SharedResource};
use crate::retrieval::Retriever;
use crate::routing::ConfidenceRouter;
use crate::vectordb::QdrantClient;

/// The production pipeline over lazily opened shared resources.
pub type FaqService = AskService<
    Arc<SharedResource<Embedder>>,
    Arc<SharedResource<QdrantClient>>,
    Arc<SharedResource<CacheBackend>>,
    ChatCompletionGenerator,
>;

impl FaqService {
    pub fn from_resources(config: &Config, resources: &Resources) -> Self {
        AskService::new(
            Retriever::new(
                Arc::clone(&resources.embedder),
                Arc::clone(&resources.knowledge_base),
            ),
            ConfidenceRouter::new(config.thresholds),
            FallbackGenerator::from_config(config.generator.clone()),
            ResponseCache::new(
                Arc::clone(&resources.cache),
                config.cache.key_version.clone(),
                config.cache.ttl,
            ),
            config.top_k,
        )
    }
}
