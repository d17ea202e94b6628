//! Query canonicalization.
//!
//! Every stage downstream of the gateway (cache keys, embedding, logging) works on the
//! output of [`normalize`], so equivalent inputs resolve to the same cache entry and the
//! same embedding.


/// Trims the text and collapses every run of whitespace into a single space.
///
/// Idempotent, and the result is never longer than the input.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`normalize`] for optional input; `None` is the empty query.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Short BLAKE3 digest of a normalized query, used to correlate log lines without
/// writing question text to the logs.
#[inline]
pub fn fingerprint(normalized: &str) -> String {
    let hash = blake3::hash(normalized.as_bytes());
    hash.to_hex()[..16].to_string()
}

/// A request-scoped question after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    normalized: String,
    force_augment: bool,
}

impl Query {
    pub fn new(raw: impl Into<String>, force_augment: bool) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        Self {
            raw,
            normalized,
            force_augment,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Caller asked for a synthesized answer even when a direct hit qualifies.
    pub fn force_augment(&self) -> bool {
        self.force_augment
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn fingerprint(&self) -> String {
        fingerprint(&self.normalized)
    }
}
