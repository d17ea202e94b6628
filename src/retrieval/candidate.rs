use serde::{Deserialize, Serialize};

use crate::vectordb::SearchHit;

use super::RetrievalError;

/// A knowledge-base entry matched against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "faq_id")]
    id: String,
    title: String,
    score: f64,
    question: Option<String>,
    answer: Option<String>,
    #[serde(skip)]
    tags: Vec<String>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, title: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            score,
            question: None,
            answer: None,
            tags: Vec::new(),
        }
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Validates a raw hit: `faq_id` metadata overrides the point id, the title falls back to
    /// the question and then the id, and empty strings count as absent.
    pub fn from_hit(hit: SearchHit) -> Result<Self, RetrievalError> {
        let SearchHit {
            id: point_id,
            mut metadata,
            distance,
        } = hit;

        let id = take_non_empty(&mut metadata, "faq_id")
            .or_else(|| Some(point_id.trim().to_string()).filter(|s| !s.is_empty()))
            .ok_or_else(|| RetrievalError::MalformedHit {
                id: point_id.clone(),
                reason: "missing identifier".to_string(),
            })?;

        if !distance.is_finite() {
            return Err(RetrievalError::MalformedHit {
                id,
                reason: format!("non-finite distance {distance}"),
            });
        }

        let question = take_non_empty(&mut metadata, "question");
        let answer = take_non_empty(&mut metadata, "answer");
        let title = take_non_empty(&mut metadata, "title")
            .or_else(|| question.clone())
            .unwrap_or_else(|| id.clone());
        let tags = take_non_empty(&mut metadata, "tags")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            id,
            title,
            score: 1.0 - distance,
            question,
            answer,
            tags,
        })
    }
}

fn take_non_empty(
    metadata: &mut std::collections::HashMap<String, String>,
    key: &str,
) -> Option<String> {
    metadata
        .remove(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
