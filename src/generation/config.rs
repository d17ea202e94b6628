use std::time::Duration;

use crate::config::{ConfigError, env};
use crate::constants::{
    DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MAX_TOKENS, DEFAULT_LLM_MODEL, DEFAULT_LLM_TEMPERATURE,
    DEFAULT_LLM_TIMEOUT_SECS,
};

/// OpenAI-compatible chat-completion endpoint settings.
#[derive(Clone, PartialEq)]
pub struct GeneratorConfig {
    pub api_key: String,
    /// Base URL without the `/chat/completions` suffix; trailing slashes are stripped.
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            temperature: DEFAULT_LLM_TEMPERATURE,
            max_tokens: DEFAULT_LLM_MAX_TOKENS,
        }
    }
}

impl GeneratorConfig {
    pub const ENV_API_KEY: &'static str = "FAQ_LLM_API_KEY";
    const ENV_BASE_URL: &'static str = "FAQ_LLM_BASE_URL";
    const ENV_MODEL: &'static str = "FAQ_LLM_MODEL";
    const ENV_TIMEOUT_SECS: &'static str = "FAQ_LLM_TIMEOUT_SECS";

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let timeout_secs = env::parse_or(Self::ENV_TIMEOUT_SECS, DEFAULT_LLM_TIMEOUT_SECS)?;

        Ok(Self {
            api_key: env::string_or(Self::ENV_API_KEY, defaults.api_key),
            base_url: env::string_or(Self::ENV_BASE_URL, defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            model: env::string_or(Self::ENV_MODEL, defaults.model),
            timeout: Duration::from_secs(timeout_secs),
            ..defaults
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// `false` when the credential is empty or a `mock` placeholder.
    pub fn is_configured(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && !key.to_ascii_lowercase().contains("mock")
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
