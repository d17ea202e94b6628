use std::sync::Arc;

use crate::service::AskPipeline;

/// Router state: the shared question-answering pipeline.
pub struct AppState<A> {
    pub pipeline: Arc<A>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

impl<A: AskPipeline> AppState<A> {
    pub fn new(pipeline: A) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn from_arc(pipeline: Arc<A>) -> Self {
        Self { pipeline }
    }
}
