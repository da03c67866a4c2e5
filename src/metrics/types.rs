// Metric data types

use serde::{Deserialize, Serialize};

/// Every deterministic measure the engine reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    CosineSimilarity,
    JaccardIndex,
    WordOverlap,
    CharacterSimilarity,
    /// Length-based proxy, not Levenshtein distance
    EditDistance,
}

impl MetricKind {
    /// Declared value range for this metric
    pub fn range(&self) -> MetricRange {
        match self {
            MetricKind::WordOverlap => MetricRange { min: 0.0, max: 100.0 },
            _ => MetricRange { min: 0.0, max: 1.0 },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::CosineSimilarity => "cosine_similarity",
            MetricKind::JaccardIndex => "jaccard_index",
            MetricKind::WordOverlap => "word_overlap",
            MetricKind::CharacterSimilarity => "character_similarity",
            MetricKind::EditDistance => "edit_distance",
        }
    }
}

/// Closed interval a metric value must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into the range; NaN collapses to the minimum
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// A named score pinned to its declared range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub kind: MetricKind,
    pub value: f64,
    pub range: MetricRange,
}

impl MetricResult {
    /// Build a result, clamping the value into the metric's range
    pub fn new(kind: MetricKind, value: f64) -> Self {
        debug_assert!(!value.is_nan(), "{} produced NaN", kind.name());
        let range = kind.range();
        let clamped = range.clamp(value);
        if clamped != value {
            tracing::warn!(
                metric = kind.name(),
                value,
                clamped,
                "Metric value outside declared range"
            );
        }
        Self {
            kind,
            value: clamped,
            range,
        }
    }
}

/// All deterministic metrics for one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub cosine_similarity: MetricResult,
    pub jaccard_index: MetricResult,
    pub word_overlap: MetricResult,
    pub character_similarity: MetricResult,
    pub edit_distance: MetricResult,
}

impl MetricSet {
    pub fn iter(&self) -> impl Iterator<Item = &MetricResult> {
        [
            &self.cosine_similarity,
            &self.jaccard_index,
            &self.word_overlap,
            &self.character_similarity,
            &self.edit_distance,
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(MetricKind::WordOverlap.range().max, 100.0);
        assert_eq!(MetricKind::JaccardIndex.range().max, 1.0);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        assert_eq!(MetricResult::new(MetricKind::CosineSimilarity, 1.0000001).value, 1.0);
        assert_eq!(MetricResult::new(MetricKind::CosineSimilarity, -0.2).value, 0.0);
        assert_eq!(MetricResult::new(MetricKind::WordOverlap, 150.0).value, 100.0);
    }

    #[test]
    fn test_nan_collapses_to_minimum() {
        assert_eq!(MetricRange { min: 0.0, max: 1.0 }.clamp(f64::NAN), 0.0);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&MetricKind::EditDistance).unwrap();
        assert_eq!(json, "\"edit_distance\"");
    }
}
