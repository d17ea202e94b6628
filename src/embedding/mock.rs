use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{Embedder, EmbeddingConfig, EmbeddingError, TextEmbedder};

/// Stub embedder with call counting and failure injection.
pub struct MockEmbedder {
    inner: Embedder,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(8)
    }
}

impl MockEmbedder {
    pub fn new(embedding_dim: usize) -> Self {
        Self {
            inner: Embedder::stub(EmbeddingConfig::stub().with_embedding_dim(embedding_dim)),
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextEmbedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmbeddingError::InferenceFailed {
                reason: "injected failure".to_string(),
            });
        }
        self.inner.embed_sync(text)
    }
}
