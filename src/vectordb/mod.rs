//! Qdrant knowledge-base integration.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{KnowledgeBase, QdrantClient};
pub use error::VectorDbError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockKnowledgeBase, cosine_similarity};
pub use model::{PAYLOAD_FIELDS, SearchHit};

pub use crate::constants::{DEFAULT_COLLECTION_NAME, DEFAULT_QDRANT_URL};
