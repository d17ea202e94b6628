//! Answer synthesis for augmented routing.
//!
//! [`ChatCompletionGenerator`] calls an OpenAI-compatible endpoint; [`TemplateGenerator`]
//! builds a degraded answer from the top reference. [`FallbackGenerator`] composes the two
//! and is the only type the router talks to.

pub mod chat;
pub mod config;
pub mod error;
pub mod fallback;
pub mod template;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use chat::{AnswerGenerator, ChatCompletionGenerator};
pub use config::GeneratorConfig;
pub use error::GenerationError;
pub use fallback::{FallbackGenerator, GeneratedAnswer};
pub use template::{NO_CONTEXT_ANSWER, TemplateGenerator};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerator;
