use std::path::PathBuf;

use crate::config::{ConfigError, env};
use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};

/// Configuration for [`Embedder`](super::Embedder).
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingConfig {
    /// Model directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    /// `None` runs the deterministic stub.
    pub model_path: Option<PathBuf>,
    /// Output embedding dimension; must match the model's hidden size.
    pub embedding_dim: usize,
    /// Max tokens to consider (longer input is truncated).
    pub max_seq_len: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl EmbeddingConfig {
    pub const ENV_MODEL_PATH: &'static str = "FAQ_EMBED_MODEL_PATH";
    const ENV_EMBEDDING_DIM: &'static str = "FAQ_EMBED_DIM";

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            model_path: env::optional_path(Self::ENV_MODEL_PATH),
            embedding_dim: env::parse_or(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?,
            ..defaults
        })
    }

    /// Config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    /// Deterministic stub embedder (no model files).
    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn is_stub(&self) -> bool {
        self.model_path.is_none()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }
}
