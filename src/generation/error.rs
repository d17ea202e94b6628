use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation service not configured")]
    NotConfigured,

    #[error("failed to build completion request: {0}")]
    InvalidRequest(String),

    #[error("generation service returned HTTP {status}")]
    Status { status: u16 },

    #[error("generation service timed out")]
    Timeout,

    #[error("generation transport error: {0}")]
    Transport(String),

    #[error("generation service returned an unreadable payload: {0}")]
    Decode(String),

    #[error("generation service returned an empty completion")]
    EmptyCompletion,
}

impl GenerationError {
    /// Short user-facing reason shown in the degraded answer prefix.
    pub fn degraded_reason(&self) -> String {
        match self {
            GenerationError::NotConfigured => "generation service not configured".to_string(),
            GenerationError::Status { status } => format!("generation service error {status}"),
            GenerationError::Timeout => "generation request timed out".to_string(),
            GenerationError::Transport(_) => "generation service unreachable".to_string(),
            GenerationError::InvalidRequest(_)
            | GenerationError::Decode(_)
            | GenerationError::EmptyCompletion => "generation service returned no answer".to_string(),
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout
        } else if err.is_decode() {
            GenerationError::Decode(err.to_string())
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}
