use tracing::{debug, instrument};

use crate::constants::{AUGMENTED_CONTEXT_SIZE, SCORE_EPSILON};
use crate::generation::{AnswerGenerator, FallbackGenerator};
use crate::retrieval::Candidate;

use super::{RouteDecision, RouteMode, RoutingThresholds};

/// Picks a [`RouteMode`] from candidate scores and assembles the answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceRouter {
    thresholds: RoutingThresholds,
}

impl ConfidenceRouter {
    pub fn new(thresholds: RoutingThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RoutingThresholds {
        &self.thresholds
    }

    /// Mode selection. `candidates` must be sorted by descending score.
    ///
    /// Comparisons allow [`SCORE_EPSILON`] of slack, so scores of `0.95` and `0.93` meet a
    /// `0.02` gap.
    pub fn select(&self, candidates: &[Candidate], force_augment: bool) -> RouteMode {
        let Some(best) = candidates.first() else {
            return RouteMode::Fallback;
        };

        let best_score = best.score();
        let gap_ok = candidates
            .get(1)
            .is_none_or(|second| meets(best_score - second.score(), self.thresholds.gap));

        if meets(best_score, self.thresholds.direct) && gap_ok && !force_augment {
            RouteMode::Direct
        } else if meets(best_score, self.thresholds.min) {
            RouteMode::Augmented
        } else {
            RouteMode::Fallback
        }
    }

    #[instrument(skip_all, fields(candidates = candidates.len(), force_augment))]
    pub async fn route<P: AnswerGenerator>(
        &self,
        query: &str,
        candidates: Vec<Candidate>,
        force_augment: bool,
        generator: &FallbackGenerator<P>,
    ) -> RouteDecision {
        let mode = self.select(&candidates, force_augment);
        let confidence = candidates.first().map_or(0.0, Candidate::score);

        let (answer, sources, degraded) = match mode {
            RouteMode::Direct => {
                let sources: Vec<Candidate> = candidates.iter().take(1).cloned().collect();
                let answer = sources.first().and_then(Candidate::answer).map(String::from);
                (answer, sources, false)
            }
            RouteMode::Augmented => {
                let top: Vec<Candidate> = candidates
                    .iter()
                    .take(AUGMENTED_CONTEXT_SIZE)
                    .cloned()
                    .collect();
                let generated = generator.generate(query, &top).await;
                (Some(generated.text), top, generated.degraded)
            }
            RouteMode::Fallback => (None, Vec::new(), false),
        };

        debug!(%mode, confidence, degraded, "Routed query");

        RouteDecision {
            mode,
            hit: mode.is_hit(),
            answer,
            confidence,
            sources,
            candidates,
            message: mode.message().to_string(),
            degraded,
        }
    }
}

#[inline]
fn meets(value: f64, threshold: f64) -> bool {
    value + SCORE_EPSILON >= threshold
}
