use std::fmt::Write as _;
use std::future::Future;
use std::sync::Arc;

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
};
use tracing::{debug, instrument};

use crate::retrieval::Candidate;

use super::{GenerationError, GeneratorConfig};

const SYSTEM_PROMPT: &str = "You are a professional enterprise HR assistant. Answer the user's \
question strictly from the [References].\n\
Rules:\n\
1. Answer only from the provided references. Never make things up.\n\
2. If the references do not fully answer the question, give the closest applicable policy or \
procedure from the most relevant reference and remind the user that HR's interpretation \
prevails. Only when the references are entirely unrelated, reply \"No related policy was found \
in the current knowledge base; please consult HR.\"\n\
3. Keep the answer well structured, friendly and professional.\n\
4. End the answer with the reference numbers you used, e.g. [Citation: Reference 1].";

/// Produces an answer for `query` from retrieved context entries.
pub trait AnswerGenerator: Send + Sync {
    fn generate(
        &self,
        query: &str,
        context: &[Candidate],
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

impl<T: AnswerGenerator> AnswerGenerator for Arc<T> {
    fn generate(
        &self,
        query: &str,
        context: &[Candidate],
    ) -> impl Future<Output = Result<String, GenerationError>> + Send {
        (**self).generate(query, context)
    }
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionGenerator {
    http: reqwest::Client,
    config: GeneratorConfig,
}

impl ChatCompletionGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerationError> {
        if !config.is_configured() {
            return Err(GenerationError::NotConfigured);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds the request body: system rules plus numbered references and the question.
    pub fn build_request(
        &self,
        query: &str,
        context: &[Candidate],
    ) -> Result<CreateChatCompletionRequest, GenerationError> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()
            .map_err(invalid)?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(user_prompt(query, context))
            .build()
            .map_err(invalid)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.config.model.clone())
            .messages([
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .temperature(self.config.temperature)
            .stream(false)
            .build()
            .map_err(invalid)?;

        Ok(with_max_tokens(request, self.config.max_tokens))
    }
}

impl AnswerGenerator for ChatCompletionGenerator {
    #[instrument(skip_all, fields(model = %self.config.model, references = context.len()))]
    async fn generate(&self, query: &str, context: &[Candidate]) -> Result<String, GenerationError> {
        let request = self.build_request(query, context)?;
        let started = std::time::Instant::now();

        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
            });
        }

        let completion: CreateChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyCompletion)?;

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Chat completion finished"
        );

        Ok(content)
    }
}

pub(crate) fn user_prompt(query: &str, context: &[Candidate]) -> String {
    let mut references = String::new();
    for (i, candidate) in context.iter().enumerate() {
        let _ = write!(
            references,
            "[Reference {}]\nQuestion: {}\nAnswer: {}\n\n",
            i + 1,
            candidate.question().unwrap_or_default(),
            candidate.answer().unwrap_or_default()
        );
    }
    format!("[References]:\n{references}\n[User question]: {query}")
}

fn invalid(err: impl std::fmt::Display) -> GenerationError {
    GenerationError::InvalidRequest(err.to_string())
}

#[allow(deprecated)]
fn with_max_tokens(
    mut request: CreateChatCompletionRequest,
    max_tokens: u32,
) -> CreateChatCompletionRequest {
    request.max_tokens = Some(max_tokens);
    request
}
