use crate::retrieval::Candidate;

use super::{AnswerGenerator, GenerationError};

pub const NO_CONTEXT_ANSWER: &str = "Sorry, no related policy was found. Please consult HR.";

/// Degraded answer built from the top reference, with no model call.
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator {
    reason: String,
}

impl TemplateGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn render(&self, context: &[Candidate]) -> String {
        let Some(best) = context.first() else {
            return NO_CONTEXT_ANSWER.to_string();
        };

        let prefix = if self.reason.is_empty() {
            String::new()
        } else {
            format!("({}; switched to basic mode) ", self.reason)
        };

        format!(
            "{prefix}According to the current policy:\n{}\n\n[Citation: Reference 1 (auto-matched)]",
            best.answer().unwrap_or_default()
        )
    }
}

impl AnswerGenerator for TemplateGenerator {
    async fn generate(&self, _query: &str, context: &[Candidate]) -> Result<String, GenerationError> {
        Ok(self.render(context))
    }
}
