use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection failed: {0}")]
    Connect(String),

    #[error("cache {operation} timed out")]
    Timeout { operation: &'static str },

    #[error("cache {operation} failed: {message}")]
    Operation {
        operation: &'static str,
        message: String,
    },
}
