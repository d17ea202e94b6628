use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::vectordb::{KnowledgeBase, SearchHit, VectorDbError};

const MOCK_COLLECTION: &str = "mock_knowledge_base";

#[derive(Clone)]
struct MockEntry {
    id: String,
    vector: Vec<f32>,
    fields: Vec<(String, String)>,
}

enum MockMode {
    /// Cosine search over inserted entries.
    Indexed(Vec<MockEntry>),
    /// Fixed hit list returned for every query (truncated to `limit`).
    Scripted(Vec<SearchHit>),
}

/// In-memory knowledge base with call counting and failure injection.
pub struct MockKnowledgeBase {
    mode: RwLock<MockMode>,
    search_calls: AtomicUsize,
    fail: AtomicBool,
}

impl Default for MockKnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl MockKnowledgeBase {
    pub fn new() -> Self {
        Self {
            mode: RwLock::new(MockMode::Indexed(Vec::new())),
            search_calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    /// Returns `hits` for every query, independent of the query vector.
    pub fn scripted(hits: Vec<SearchHit>) -> Self {
        let mock = Self::new();
        *mock.mode.write() = MockMode::Scripted(hits);
        mock
    }

    /// Adds an entry to the cosine index. Ignored in scripted mode.
    pub fn insert(&self, id: &str, vector: Vec<f32>, fields: &[(&str, &str)]) {
        if let MockMode::Indexed(entries) = &mut *self.mode.write() {
            entries.push(MockEntry {
                id: id.to_string(),
                vector,
                fields: fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });
        }
    }

    /// Makes every subsequent call fail as if the backend were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `search` calls observed (including failed ones).
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    fn rank(&self, query: &[f32], limit: usize) -> Vec<SearchHit> {
        match &*self.mode.read() {
            MockMode::Scripted(hits) => hits.iter().take(limit).cloned().collect(),
            MockMode::Indexed(entries) => {
                let mut hits: Vec<SearchHit> = entries
                    .iter()
                    .map(|entry| {
                        let mut hit = SearchHit::new(
                            entry.id.clone(),
                            1.0 - f64::from(cosine_similarity(query, &entry.vector)),
                        );
                        for (k, v) in &entry.fields {
                            hit = hit.with_field(k, v.clone());
                        }
                        hit
                    })
                    .collect();

                hits.sort_by(|a, b| {
                    a.distance
                        .partial_cmp(&b.distance)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                hits.truncate(limit);
                hits
            }
        }
    }

    fn unavailable(&self) -> VectorDbError {
        VectorDbError::ConnectionFailed {
            url: "mock://knowledge-base".to_string(),
            message: "injected failure".to_string(),
        }
    }
}

impl KnowledgeBase for MockKnowledgeBase {
    async fn search(&self, query: Vec<f32>, limit: u64) -> Result<Vec<SearchHit>, VectorDbError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(self.unavailable());
        }

        Ok(self.rank(&query, limit as usize))
    }

    async fn ensure_ready(&self) -> Result<(), VectorDbError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(VectorDbError::CollectionNotFound {
                collection: MOCK_COLLECTION.to_string(),
            });
        }
        Ok(())
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
