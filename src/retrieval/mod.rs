//! Embedding + vector search, validated into typed [`Candidate`]s.

pub mod candidate;
pub mod error;
pub mod retriever;


pub use candidate::Candidate;
pub use error::RetrievalError;
pub use retriever::Retriever;
