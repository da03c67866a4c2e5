// Metrics module
// Public interface for the deterministic similarity measures

mod lexical;
mod types;
mod vector;

pub use lexical::{character_similarity, jaccard_index, length_similarity, word_overlap};
pub use types::{MetricKind, MetricRange, MetricResult, MetricSet};
pub use vector::{cosine_similarity, TfIdfModel};

/// Run every deterministic metric over one pair of texts
pub fn compute_all(text_a: &str, text_b: &str) -> MetricSet {
    MetricSet {
        cosine_similarity: cosine_similarity(text_a, text_b),
        jaccard_index: jaccard_index(text_a, text_b),
        word_overlap: word_overlap(text_a, text_b),
        character_similarity: character_similarity(text_a, text_b),
        edit_distance: length_similarity(text_a, text_b),
    }
}
