use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, instrument, warn};

use crate::cache::CACHE_STATUS_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::state::AppState;
use crate::service::{AskPipeline, AskRequest};

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /health`: opens the knowledge base if needed and checks it.
#[instrument(skip(state))]
pub async fn health_handler<A: AskPipeline>(
    State(state): State<AppState<A>>,
) -> Result<Response, GatewayError> {
    if let Err(e) = state.pipeline.ready().await {
        warn!(error = %e, "Health check failed");
        return Err(e.into());
    }

    Ok((StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response())
}

/// `POST /ask`.
#[instrument(skip_all)]
pub async fn ask_handler<A: AskPipeline>(
    State(state): State<AppState<A>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let Json(body) =
        body.map_err(|e| GatewayError::InvalidRequest(format!("Malformed JSON body: {}", e)))?;
    let request: AskRequest = serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let outcome = state.pipeline.ask(&request).await.map_err(|e| {
        let err = GatewayError::from(e);
        if err.status_code().is_server_error() {
            error!(error = %err, "Ask request failed");
        }
        err
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        CACHE_STATUS_HEADER,
        HeaderValue::from_static(outcome.cache_status.as_header_value()),
    );

    Ok((StatusCode::OK, headers, Json(outcome.response)).into_response())
}
