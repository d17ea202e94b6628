use tracing::{info, warn};

use crate::query::fingerprint;
use crate::retrieval::Candidate;

use super::{
    AnswerGenerator, ChatCompletionGenerator, GenerationError, GeneratorConfig, TemplateGenerator,
};

/// Text produced for an augmented answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAnswer {
    pub text: String,
    /// `true` when the template stood in for the primary generator.
    pub degraded: bool,
}

/// Primary generator with a template fallback. Never fails.
#[derive(Debug, Clone)]
pub struct FallbackGenerator<P> {
    primary: Option<P>,
}

impl FallbackGenerator<ChatCompletionGenerator> {
    /// Uses the chat-completion client when credentials are configured, the template otherwise.
    pub fn from_config(config: GeneratorConfig) -> Self {
        match ChatCompletionGenerator::new(config) {
            Ok(client) => {
                info!(model = %client.config().model, "Chat-completion generation enabled");
                Self::new(client)
            }
            Err(e) => {
                warn!(reason = %e, "Generation running in basic mode");
                Self::template_only()
            }
        }
    }
}

impl<P: AnswerGenerator> FallbackGenerator<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary: Some(primary),
        }
    }

    pub fn template_only() -> Self {
        Self { primary: None }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub async fn generate(&self, query: &str, context: &[Candidate]) -> GeneratedAnswer {
        let err = match &self.primary {
            None => GenerationError::NotConfigured,
            Some(primary) => match primary.generate(query, context).await {
                Ok(text) => {
                    return GeneratedAnswer {
                        text,
                        degraded: false,
                    };
                }
                Err(e) => {
                    warn!(
                        query = %fingerprint(query),
                        error = %e,
                        "Generation failed, using template answer"
                    );
                    e
                }
            },
        };

        let template = TemplateGenerator::new(err.degraded_reason());
        let text = template
            .generate(query, context)
            .await
            .unwrap_or_else(|_| template.render(context));

        GeneratedAnswer {
            text,
            degraded: true,
        }
    }
}
