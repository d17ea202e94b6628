//! Confidence routing: direct answer, augmented synthesis, or fallback.
//!
//! Rules, evaluated in order over candidates sorted by descending score:
//!
//! 1. no candidates: fallback with confidence `0.0`
//! 2. best `>= direct`, best leads the runner-up by `>= gap`, not forced: direct
//! 3. best `>= min`: augmented over the top three candidates
//! 4. otherwise fallback

pub mod config;
pub mod router;
pub mod types;


pub use config::RoutingThresholds;
pub use router::ConfidenceRouter;
pub use types::{AUGMENTED_MESSAGE, DIRECT_MESSAGE, FALLBACK_MESSAGE, RouteDecision, RouteMode};
