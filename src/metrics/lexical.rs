// Lexical similarity measures
//
// Set-based and length-based comparisons. All of them are total: any pair of
// inputs, including two empty strings, yields a value inside the range.

use std::collections::HashSet;
use std::hash::Hash;

use super::types::{MetricKind, MetricResult};
use crate::text::{char_set, word_set};

/// Character-set overlap (0.0 = disjoint, 1.0 = same characters)
///
/// Works on the trimmed text with case and punctuation preserved.
pub fn character_similarity(text_a: &str, text_b: &str) -> MetricResult {
    let value = set_ratio(&char_set(text_a), &char_set(text_b));
    MetricResult::new(MetricKind::CharacterSimilarity, value)
}

/// Jaccard index over word sets
pub fn jaccard_index(text_a: &str, text_b: &str) -> MetricResult {
    let value = set_ratio(&word_set(text_a), &word_set(text_b));
    MetricResult::new(MetricKind::JaccardIndex, value)
}

/// Word overlap percentage: 2·|A ∩ B| / (|A| + |B|) · 100 over word sets
pub fn word_overlap(text_a: &str, text_b: &str) -> MetricResult {
    let words_a = word_set(text_a);
    let words_b = word_set(text_b);

    let total = words_a.len() + words_b.len();
    let value = if total == 0 {
        0.0
    } else {
        let shared = words_a.intersection(&words_b).count();
        (shared * 2) as f64 / total as f64 * 100.0
    };

    MetricResult::new(MetricKind::WordOverlap, value)
}

/// Length similarity reported as "edit distance"
///
/// 1 - |len(A) - len(B)| / max(len(A), len(B)), counted in characters of the
/// trimmed text. This compares lengths only; it is not Levenshtein distance.
pub fn length_similarity(text_a: &str, text_b: &str) -> MetricResult {
    let len_a = text_a.trim().chars().count();
    let len_b = text_b.trim().chars().count();

    let longest = len_a.max(len_b);
    let value = if longest == 0 {
        1.0
    } else {
        1.0 - len_a.abs_diff(len_b) as f64 / longest as f64
    };

    MetricResult::new(MetricKind::EditDistance, value)
}

/// |A ∩ B| / |A ∪ B|, with two empty sets counted as identical
fn set_ratio<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0; // Both empty = identical
    }

    let intersection = a.intersection(b).count();
    let union = a.union(b).count();

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX_A: &str = "The quick brown fox jumps over the lazy dog";
    const FOX_B: &str = "A quick brown fox leaps over a lazy dog";

    #[test]
    fn test_identical_texts() {
        let text = "Rust is a systems programming language";
        assert_eq!(character_similarity(text, text).value, 1.0);
        assert_eq!(jaccard_index(text, text).value, 1.0);
        assert_eq!(word_overlap(text, text).value, 100.0);
        assert_eq!(length_similarity(text, text).value, 1.0);
    }

    #[test]
    fn test_fox_scenario() {
        // 6 shared words out of 10 distinct
        assert!((jaccard_index(FOX_A, FOX_B).value - 0.6).abs() < 1e-9);
        // 2 * 6 / (8 + 8)
        assert!((word_overlap(FOX_A, FOX_B).value - 75.0).abs() < 1e-9);
        // 23 shared characters out of 29 ('T', 'A' and space included)
        assert!((character_similarity(FOX_A, FOX_B).value - 23.0 / 29.0).abs() < 1e-9);
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(character_similarity("", "").value, 1.0);
        assert_eq!(jaccard_index("", "").value, 1.0);
        assert_eq!(word_overlap("", "").value, 0.0);
        assert_eq!(length_similarity("", "").value, 1.0);
    }

    #[test]
    fn test_one_empty() {
        assert_eq!(character_similarity("hello", "").value, 0.0);
        assert_eq!(jaccard_index("", "hello").value, 0.0);
        assert_eq!(word_overlap("hello", "").value, 0.0);
        assert_eq!(length_similarity("hello", "").value, 0.0);
    }

    #[test]
    fn test_disjoint_words() {
        assert_eq!(jaccard_index("alpha beta", "gamma delta").value, 0.0);
        assert_eq!(word_overlap("alpha beta", "gamma delta").value, 0.0);
    }

    #[test]
    fn test_word_metrics_ignore_case_and_punctuation() {
        assert_eq!(jaccard_index("Hello, world!", "hello WORLD").value, 1.0);
    }

    #[test]
    fn test_character_similarity_is_case_sensitive() {
        assert!(character_similarity("ABC", "abc").value < 1.0);
    }

    #[test]
    fn test_length_similarity_uses_char_counts() {
        // 4 vs 8 characters
        assert!((length_similarity("abcd", "abcdefgh").value - 0.5).abs() < 1e-9);
        // multi-byte characters count once
        assert_eq!(length_similarity("héllo", "hello").value, 1.0);
    }
}
