use tracing::{debug, instrument};

use crate::embedding::TextEmbedder;
use crate::query::{fingerprint, normalize};
use crate::vectordb::KnowledgeBase;

use super::{Candidate, RetrievalError};

/// Embeds a query and turns nearest-neighbour hits into ranked [`Candidate`]s.
pub struct Retriever<E, K> {
    embedder: E,
    knowledge_base: K,
}

impl<E, K> Retriever<E, K>
where
    E: TextEmbedder,
    K: KnowledgeBase,
{
    pub fn new(embedder: E, knowledge_base: K) -> Self {
        Self {
            embedder,
            knowledge_base,
        }
    }

    pub fn knowledge_base(&self) -> &K {
        &self.knowledge_base
    }

    /// Returns up to `top_k` candidates sorted by descending score (stable on ties).
    ///
    /// An empty query yields no candidates and never reaches the backends.
    #[instrument(skip(self, query))]
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<Candidate>, RetrievalError> {
        if top_k == 0 {
            return Err(RetrievalError::InvalidTopK);
        }

        let normalized = normalize(query);
        if normalized.is_empty() {
            debug!("Empty query, skipping retrieval");
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed(&normalized).await?;
        let hits = self.knowledge_base.search(vector, top_k as u64).await?;

        let mut candidates = hits
            .into_iter()
            .map(Candidate::from_hit)
            .collect::<Result<Vec<_>, _>>()?;

        candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));

        debug!(
            query = %fingerprint(&normalized),
            count = candidates.len(),
            best = candidates.first().map(Candidate::score),
            "Retrieved candidates"
        );

        Ok(candidates)
    }
}
