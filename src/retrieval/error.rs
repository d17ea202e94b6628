use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector search failed: {0}")]
    VectorDb(#[from] VectorDbError),

    #[error("top_k must be at least 1")]
    InvalidTopK,

    #[error("malformed search hit '{id}': {reason}")]
    MalformedHit { id: String, reason: String },
}
