// Comparison data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::metrics::MetricSet;
use crate::oracle::{OracleError, OracleResponse};
use crate::text::{normalize, word_set, CleanedText, NormalizationMode};

/// Per-comparison behaviour
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Ask the semantic oracle at all
    pub enable_semantic_oracle: bool,

    /// Upper bound on the oracle call, in milliseconds
    pub oracle_timeout_ms: u64,

    /// Characters of each text included in the oracle prompt
    pub excerpt_chars: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            enable_semantic_oracle: true,
            oracle_timeout_ms: 10_000,
            excerpt_chars: 500,
        }
    }
}

/// Which words the texts share and which are their own
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WordBreakdown {
    /// Sorted
    pub shared_words: Vec<String>,
    pub unique_text1: Vec<String>,
    pub unique_text2: Vec<String>,
}

impl WordBreakdown {
    pub fn new(text_a: &str, text_b: &str) -> Self {
        let words_a = word_set(text_a);
        let words_b = word_set(text_b);

        let sorted = |words: HashSet<&String>| {
            let mut words: Vec<String> = words.into_iter().cloned().collect();
            words.sort();
            words
        };

        Self {
            shared_words: sorted(words_a.intersection(&words_b).collect()),
            unique_text1: sorted(words_a.difference(&words_b).collect()),
            unique_text2: sorted(words_b.difference(&words_a).collect()),
        }
    }
}

/// Size statistics for both texts
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextStats {
    pub text1_words: usize,
    pub text2_words: usize,
    pub text1_chars: usize,
    pub text2_chars: usize,
    pub total_unique_words: usize,
    /// |text1_chars - text2_chars|
    pub length_difference: usize,
}

impl TextStats {
    pub fn new(text_a: &str, text_b: &str) -> Self {
        let word_count = |text: &str| match normalize(text, NormalizationMode::Word) {
            CleanedText::Words(words) => words.len(),
            CleanedText::Characters(_) => 0,
        };
        let text1_chars = text_a.trim().chars().count();
        let text2_chars = text_b.trim().chars().count();

        let words_a = word_set(text_a);
        let words_b = word_set(text_b);

        Self {
            text1_words: word_count(text_a),
            text2_words: word_count(text_b),
            text1_chars,
            text2_chars,
            total_unique_words: words_a.union(&words_b).count(),
            length_difference: text1_chars.abs_diff(text2_chars),
        }
    }
}

/// Why the semantic section is unavailable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OracleFailure {
    /// "disabled", "not_configured", "unparseable", or an `OracleError` kind
    pub kind: String,
    pub message: String,
}

impl OracleFailure {
    pub fn disabled() -> Self {
        Self {
            kind: "disabled".to_string(),
            message: "Semantic analysis disabled for this comparison".to_string(),
        }
    }

    pub fn not_configured() -> Self {
        Self {
            kind: "not_configured".to_string(),
            message: "No semantic oracle configured".to_string(),
        }
    }

    pub fn unparseable() -> Self {
        Self {
            kind: "unparseable".to_string(),
            message: "Oracle output contained no recognizable fields".to_string(),
        }
    }
}

impl From<&OracleError> for OracleFailure {
    fn from(err: &OracleError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Unified result of one comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub metrics: MetricSet,

    #[serde(flatten)]
    pub words: WordBreakdown,

    pub stats: TextStats,

    /// Always present; fields are "unavailable" in degraded mode
    pub semantic_analysis: OracleResponse,

    pub ai_available: bool,

    /// Provider that was asked; absent when the oracle is disabled or not configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_provider: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_failure: Option<OracleFailure>,

    pub compared_at: DateTime<Utc>,
}
