// Oracle response types
//
// Every field is always present. Whatever could not be recovered from the
// oracle's output serializes as the string "unavailable", so consumers see a
// stable shape whether the model answered perfectly, partially, or not at all.

use serde::{Serialize, Serializer};

/// Marker written in place of a missing value
pub const UNAVAILABLE: &str = "unavailable";

/// A value recovered from the oracle, or an explicit "unavailable" marker
#[derive(Debug, Clone, PartialEq)]
pub enum Availability<T> {
    Available(T),
    Unavailable,
}

impl<T> Default for Availability<T> {
    fn default() -> Self {
        Availability::Unavailable
    }
}

impl<T> Availability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Availability::Available(value) => Some(value),
            Availability::Unavailable => None,
        }
    }

    /// Keep `self` if present, otherwise take `other`
    pub fn or(self, other: Availability<T>) -> Availability<T> {
        match self {
            Availability::Available(_) => self,
            Availability::Unavailable => other,
        }
    }
}

impl<T> From<Option<T>> for Availability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Availability::Available(value),
            None => Availability::Unavailable,
        }
    }
}

impl<T: Serialize> Serialize for Availability<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Availability::Available(value) => value.serialize(serializer),
            Availability::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

/// Structured reading of the oracle's answer
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OracleResponse {
    /// Semantic similarity, clamped to [0, 1]
    pub semantic_similarity: Availability<f64>,
    pub themes_text1: Availability<Vec<String>>,
    pub themes_text2: Availability<Vec<String>>,
    pub writing_style_comparison: Availability<String>,
    pub suggestions: Availability<Vec<String>>,
    pub insights: Availability<String>,
    pub key_differences: Availability<String>,
}

impl OracleResponse {
    /// Every field marked unavailable
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// True when at least one field was recovered
    pub fn has_content(&self) -> bool {
        self.semantic_similarity.is_available()
            || self.themes_text1.is_available()
            || self.themes_text2.is_available()
            || self.writing_style_comparison.is_available()
            || self.suggestions.is_available()
            || self.insights.is_available()
            || self.key_differences.is_available()
    }
}
