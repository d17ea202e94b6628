use std::collections::HashMap;

use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{ScoredPoint, Value};

/// Payload keys the knowledge-base index is built with.
pub const PAYLOAD_FIELDS: [&str; 5] = ["faq_id", "title", "question", "answer", "tags"];

/// One raw nearest-neighbour hit: backend identifier, loosely-typed metadata and cosine
/// distance (`0.0` = identical direction).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub metadata: HashMap<String, String>,
    pub distance: f64,
}

impl SearchHit {
    pub fn new(id: impl Into<String>, distance: f64) -> Self {
        Self {
            id: id.into(),
            metadata: HashMap::new(),
            distance,
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Converts a Qdrant hit. Qdrant reports cosine *similarity* for cosine collections, so
    /// it is mapped back to a distance here. A point without an id keeps an empty `id` and
    /// is left for retrieval to reject.
    pub fn from_scored_point(point: ScoredPoint) -> Self {
        let id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => n.to_string(),
            Some(PointIdOptions::Uuid(u)) => u,
            None => String::new(),
        };

        let metadata = point
            .payload
            .iter()
            .filter(|(key, _)| PAYLOAD_FIELDS.contains(&key.as_str()))
            .filter_map(|(key, value)| payload_to_string(value).map(|v| (key.clone(), v)))
            .collect();

        SearchHit {
            id,
            metadata,
            distance: 1.0 - f64::from(point.score),
        }
    }
}

fn payload_to_string(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    if let Some(i) = value.as_integer() {
        return Some(i.to_string());
    }
    // Tag lists are flattened to a comma-separated string.
    value.as_list().map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str().map(String::as_str))
            .collect::<Vec<_>>()
            .join(",")
    })
}
