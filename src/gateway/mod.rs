//! HTTP gateway (Axum): `GET /health` and `POST /ask`.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{HealthResponse, ask_handler, health_handler};
pub use state::AppState;

use crate::service::AskPipeline;

pub fn create_router_with_state<A: AskPipeline>(state: AppState<A>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<A>))
        .route("/ask", post(ask_handler::<A>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
