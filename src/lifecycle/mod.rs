//! Lazily opened process-wide handles and their shutdown.

pub mod resource;
pub mod resources;


pub use resource::{Resource, SharedResource};
pub use resources::{KnowledgeBaseConfig, Resources};
