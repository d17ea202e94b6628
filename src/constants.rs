//! Cross-cutting, shared constants.
//!
//! Module configs default to these values; environment overrides are applied in each
//! module's `from_env`.

/// Candidates requested from the vector backend per query.
pub const DEFAULT_TOP_K: usize = 5;

/// Minimum score for answering with a pre-authored answer verbatim.
pub const DEFAULT_DIRECT_THRESHOLD: f64 = 0.83;
/// Minimum score for answering at all (augmented mode).
pub const DEFAULT_MIN_THRESHOLD: f64 = 0.40;
/// Required margin between the best and second-best candidate for direct mode.
pub const DEFAULT_GAP_THRESHOLD: f64 = 0.02;

/// Slack on threshold comparisons so a score or gap that equals a threshold in decimal
/// still meets it after `1 - distance` and subtraction rounding.
pub const SCORE_EPSILON: f64 = 1e-9;

/// Number of top candidates handed to the generator and reported as sources.
pub const AUGMENTED_CONTEXT_SIZE: usize = 3;

/// Output dimension of `bge-small`-class sentence embedders.
pub const DEFAULT_EMBEDDING_DIM: usize = 512;
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

pub const DEFAULT_COLLECTION_NAME: &str = "hr_faq";
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Bump whenever routing semantics change so stale cached responses are never served.
pub const DEFAULT_CACHE_KEY_VERSION: &str = "v3";
pub const DEFAULT_CACHE_TIMEOUT_MS: u64 = 200;
pub const DEFAULT_DIRECT_TTL_SECS: u64 = 60 * 60;
pub const DEFAULT_AUGMENTED_TTL_SECS: u64 = 2 * 60 * 60;
pub const DEFAULT_FALLBACK_TTL_SECS: u64 = 10 * 60;
pub const DEFAULT_MEMORY_CACHE_CAPACITY: u64 = 10_000;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.siliconflow.cn/v1";
pub const DEFAULT_LLM_MODEL: &str = "deepseek-ai/DeepSeek-V3";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 512;

/// Maximum accepted question length, in characters.
pub const MAX_QUESTION_CHARS: usize = 500;
