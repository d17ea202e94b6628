use serde::{Deserialize, Serialize};

use crate::cache::CacheStatus;
use crate::constants::MAX_QUESTION_CHARS;
use crate::retrieval::Candidate;
use crate::routing::{RouteDecision, RouteMode};

use super::AskError;

/// `POST /ask` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Forces augmented synthesis even when a direct answer qualifies.
    #[serde(default)]
    pub rewrite: bool,
}

impl AskRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            rewrite: false,
        }
    }

    pub fn with_rewrite(mut self, rewrite: bool) -> Self {
        self.rewrite = rewrite;
        self
    }

    /// Question must be 1..=500 characters. Whitespace-only passes and falls back later.
    pub fn validate(&self) -> Result<(), AskError> {
        let len = self.question.chars().count();
        if len == 0 {
            return Err(AskError::EmptyQuestion);
        }
        if len > MAX_QUESTION_CHARS {
            return Err(AskError::QuestionTooLong {
                max: MAX_QUESTION_CHARS,
                len,
            });
        }
        Ok(())
    }
}

/// `POST /ask` response body, also the cached value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub hit: bool,
    pub mode: RouteMode,
    pub answer: Option<String>,
    pub message: String,
    pub confidence: f64,
    pub sources: Vec<Candidate>,
    pub candidates: Vec<Candidate>,
}

impl From<RouteDecision> for AskResponse {
    fn from(decision: RouteDecision) -> Self {
        Self {
            hit: decision.hit,
            mode: decision.mode,
            answer: decision.answer,
            message: decision.message,
            confidence: decision.confidence,
            sources: decision.sources,
            candidates: decision.candidates,
        }
    }
}

/// A response and whether the cache served it.
#[derive(Debug, Clone, PartialEq)]
pub struct AskOutcome {
    pub response: AskResponse,
    pub cache_status: CacheStatus,
}
