use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cache::{CACHE_STATUS_HEADER, CacheStatus};
use crate::retrieval::RetrievalError;
use crate::service::AskError;
use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("knowledge base unavailable: {0}")]
    BackendUnavailable(String),

    #[error("knowledge base returned invalid data: {0}")]
    BadBackendData(String),

    #[error("embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<AskError> for GatewayError {
    fn from(err: AskError) -> Self {
        match err {
            AskError::EmptyQuestion | AskError::QuestionTooLong { .. } => {
                GatewayError::InvalidRequest(err.to_string())
            }
            AskError::Retrieval(RetrievalError::VectorDb(e)) => {
                GatewayError::BackendUnavailable(e.to_string())
            }
            AskError::Retrieval(e @ RetrievalError::MalformedHit { .. }) => {
                GatewayError::BadBackendData(e.to_string())
            }
            AskError::Retrieval(RetrievalError::Embedding(e)) => {
                GatewayError::EmbeddingFailed(e.to_string())
            }
            AskError::Retrieval(e @ RetrievalError::InvalidTopK) => {
                GatewayError::InternalError(e.to_string())
            }
        }
    }
}

impl From<VectorDbError> for GatewayError {
    fn from(err: VectorDbError) -> Self {
        GatewayError::BackendUnavailable(err.to_string())
    }
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::BadBackendData(_) => StatusCode::BAD_GATEWAY,
            GatewayError::EmbeddingFailed(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut headers = HeaderMap::new();
        headers.insert(
            CACHE_STATUS_HEADER,
            HeaderValue::from_static(CacheStatus::Miss.as_header_value()),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
