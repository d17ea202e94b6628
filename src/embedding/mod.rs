//! Query embedding.
//!
//! [`Embedder`] runs a local BERT sentence encoder (CLS pooling, L2-normalized output)
//! through candle. Without a model directory it falls back to a deterministic
//! hash-seeded stub, which keeps tests and local runs free of model files.

pub mod bert;
pub mod config;
pub mod device;
pub mod embedder;
pub mod error;
pub mod tokenizer;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use config::EmbeddingConfig;
pub use device::select_device;
pub use embedder::{Embedder, TextEmbedder};
pub use error::EmbeddingError;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
