use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::retrieval::Candidate;

use super::{AnswerGenerator, GenerationError};

/// Canned generator: echoes the query and reference count.
#[derive(Debug, Default)]
pub struct MockGenerator {
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with [`GenerationError::Timeout`].
    pub fn failing() -> Self {
        let mock = Self::new();
        mock.fail.store(true, Ordering::SeqCst);
        mock
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn expected_answer(query: &str, references: usize) -> String {
        format!("Synthesized answer to '{query}' from {references} references.")
    }
}

impl AnswerGenerator for MockGenerator {
    async fn generate(&self, query: &str, context: &[Candidate]) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(GenerationError::Timeout);
        }
        Ok(Self::expected_answer(query, context.len()))
    }
}
