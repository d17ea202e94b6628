use std::future::Future;
use std::sync::Arc;

use candle_core::Device;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::bert::BertEncoder;
use super::config::EmbeddingConfig;
use super::device::select_device;
use super::error::EmbeddingError;
use super::tokenizer::load_tokenizer;

/// Turns query text into a fixed-dimension vector.
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;
}

impl<T: TextEmbedder> TextEmbedder for Arc<T> {
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send {
        (**self).embed(text)
    }
}

enum EmbedderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Sentence embedder backed by a local BERT model, or a deterministic stub.
///
/// Cloning shares the loaded model.
#[derive(Clone)]
pub struct Embedder {
    backend: Arc<EmbedderBackend>,
    config: EmbeddingConfig,
}

impl std::fmt::Debug for Embedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Embedder")
            .field(
                "backend",
                &match self.backend.as_ref() {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

impl Embedder {
    /// Loads model weights and tokenizer. Blocking; call from `spawn_blocking`.
    pub fn load(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let Some(model_dir) = config.model_path.clone() else {
            warn!("Embedder running in STUB mode");
            return Ok(Self::stub(config));
        };

        if !model_dir.join("model.safetensors").exists() {
            return Err(EmbeddingError::ModelNotFound { path: model_dir });
        }

        let device = select_device();
        let tokenizer = load_tokenizer(&model_dir, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;
        let encoder = BertEncoder::load(&model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: e.to_string(),
            }
        })?;

        if encoder.hidden_size() != config.embedding_dim {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "model hidden size {} does not match configured dimension {}",
                    encoder.hidden_size(),
                    config.embedding_dim
                ),
            });
        }

        info!(
            model_path = %model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "Embedding model loaded"
        );

        Ok(Self {
            backend: Arc::new(EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            }),
            config,
        })
    }

    pub fn stub(config: EmbeddingConfig) -> Self {
        Self {
            backend: Arc::new(EmbedderBackend::Stub),
            config,
        }
    }

    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend.as_ref(), EmbedderBackend::Stub)
    }

    /// Synchronous embedding; the returned vector is L2-normalized.
    pub fn embed_sync(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let raw = match self.backend.as_ref() {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => {
                let encoding = tokenizer.encode(text, true).map_err(|e| {
                    EmbeddingError::TokenizationFailed {
                        reason: e.to_string(),
                    }
                })?;
                let ids = encoding.get_ids();
                if ids.is_empty() {
                    return Err(EmbeddingError::TokenizationFailed {
                        reason: "tokenizer produced no tokens".to_string(),
                    });
                }
                encoder.encode(ids, device)?
            }
            EmbedderBackend::Stub => self.stub_vector(text),
        };

        Ok(l2_normalize(raw))
    }

    fn stub_vector(&self, text: &str) -> Vec<f32> {
        debug!(text_len = text.len(), "Generating stub embedding");

        let digest = blake3::hash(text.as_bytes());
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&digest.as_bytes()[..8]);
        let mut state = u64::from_le_bytes(seed);

        (0..self.config.embedding_dim)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }
}

impl TextEmbedder for Embedder {
    /// Tokenization and the forward pass run on the blocking pool.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let embedder = self.clone();
        let text = text.to_string();
        run_blocking(move || embedder.embed_sync(&text)).await
    }
}

pub(crate) async fn run_blocking<F>(f: F) -> Result<Vec<f32>, EmbeddingError>
where
    F: FnOnce() -> Result<Vec<f32>, EmbeddingError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("embedding task failed: {e}"),
        })?
}

pub(crate) fn l2_normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }
    embedding
}
