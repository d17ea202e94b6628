//! FAQ router library crate (used by the server binary and integration tests).
//!
//! A question is normalized, looked up in the response cache, and on a miss embedded and
//! matched against a vector knowledge base. The [`ConfidenceRouter`] then answers it
//! directly, synthesizes an answer from the top entries, or falls back.
//!
//! ## Pipeline
//! - [`query`] - normalization and log fingerprints
//! - [`Retriever`] - embedding + vector search into typed [`Candidate`]s
//! - [`ConfidenceRouter`] - mode selection and answer assembly
//! - [`FallbackGenerator`] - chat-completion synthesis with a template fallback
//! - [`ResponseCache`] - fail-open cache over redis, memory, or nothing
//! - [`AskService`] - the request pipeline; [`gateway`] exposes it over HTTP
//!
//! ## Resources
//! [`Resources`] holds the process-wide embedder, knowledge-base client and cache
//! connection as lazily opened [`SharedResource`]s.
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod generation;
pub mod lifecycle;
pub mod query;
pub mod retrieval;
pub mod routing;
pub mod service;
pub mod vectordb;

pub use cache::{
    CACHE_STATUS_HEADER, CacheBackend, CacheBackendKind, CacheConfig, CacheError, CacheStatus,
    CacheStore, MemoryStore, RedisStore, ResponseCache, TtlPolicy, cache_key,
};
#[cfg(any(test, feature = "mock"))]
pub use cache::{FailingStore, RecordingStore};

pub use config::{Config, ConfigError};
pub use embedding::{Embedder, EmbeddingConfig, EmbeddingError, TextEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;

pub use generation::{
    AnswerGenerator, ChatCompletionGenerator, FallbackGenerator, GeneratedAnswer,
    GenerationError, GeneratorConfig, TemplateGenerator,
};
#[cfg(any(test, feature = "mock"))]
pub use generation::MockGenerator;

pub use lifecycle::{KnowledgeBaseConfig, Resource, Resources, SharedResource};
pub use query::{Query, fingerprint, normalize};
pub use retrieval::{Candidate, RetrievalError, Retriever};
pub use routing::{ConfidenceRouter, RouteDecision, RouteMode, RoutingThresholds};
pub use service::{
    AskError, AskOutcome, AskPipeline, AskRequest, AskResponse, AskService, FaqService,
};

pub use vectordb::{KnowledgeBase, QdrantClient, SearchHit, VectorDbError};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockKnowledgeBase;
