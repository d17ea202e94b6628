use thiserror::Error;

use crate::retrieval::RetrievalError;

#[derive(Debug, Error)]
pub enum AskError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("question is {len} characters; the limit is {max}")]
    QuestionTooLong { max: usize, len: usize },

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}
