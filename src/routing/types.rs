use serde::{Deserialize, Serialize};

use crate::retrieval::Candidate;

pub const DIRECT_MESSAGE: &str = "Answered directly from the knowledge base.";
pub const AUGMENTED_MESSAGE: &str = "Answer synthesized from knowledge base entries.";
pub const FALLBACK_MESSAGE: &str = "Sorry, no matching policy was found in the knowledge base. \
Please contact your HRBP or IT support.";

/// How a query is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// Top entry's answer returned verbatim.
    Direct,
    /// Answer synthesized from the top entries.
    #[serde(rename = "llm")]
    Augmented,
    /// No confident match.
    Fallback,
}

impl RouteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMode::Direct => "direct",
            RouteMode::Augmented => "llm",
            RouteMode::Fallback => "fallback",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RouteMode::Direct => DIRECT_MESSAGE,
            RouteMode::Augmented => AUGMENTED_MESSAGE,
            RouteMode::Fallback => FALLBACK_MESSAGE,
        }
    }

    pub fn is_hit(&self) -> bool {
        !matches!(self, RouteMode::Fallback)
    }
}

impl std::fmt::Display for RouteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing outcome with the assembled answer payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDecision {
    pub mode: RouteMode,
    pub hit: bool,
    /// `None` for fallback, and for a direct hit whose entry has no answer text.
    pub answer: Option<String>,
    /// Best candidate score, `0.0` with no candidates.
    pub confidence: f64,
    pub sources: Vec<Candidate>,
    /// Every retrieved candidate, for diagnostics.
    pub candidates: Vec<Candidate>,
    pub message: String,
    /// Set when an augmented answer came from the template fallback.
    pub degraded: bool,
}
