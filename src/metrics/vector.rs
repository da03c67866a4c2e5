// TF-IDF character n-gram vectors and cosine similarity
//
// The model is fit over exactly the two texts being compared and thrown away
// afterwards, so nothing leaks between comparisons.

use std::collections::{BTreeMap, HashSet};

use super::types::{MetricKind, MetricResult};

const MIN_NGRAM: usize = 1;
const MAX_NGRAM: usize = 3;

/// Vocabulary and smoothed IDF weights fit over a small corpus
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    /// n-gram → dimension index (sorted, so dimensions are deterministic)
    vocabulary: BTreeMap<String, usize>,
    /// IDF weight per dimension
    idf: Vec<f64>,
}

impl TfIdfModel {
    /// Fit vocabulary and IDF weights over `documents`
    ///
    /// IDF is smoothed: ln((1 + n) / (1 + df)) + 1.
    pub fn fit(documents: &[&str]) -> Self {
        let n = documents.len() as f64;

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: HashSet<String> = char_ngrams(doc).into_iter().collect();
            for gram in unique {
                *doc_freq.entry(gram).or_insert(0) += 1;
            }
        }

        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (gram, df)) in doc_freq.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(gram, idx);
        }

        Self { vocabulary, idf }
    }

    /// Number of dimensions (distinct n-grams in the corpus)
    pub fn dims(&self) -> usize {
        self.vocabulary.len()
    }

    /// Dense, L2-normalised TF-IDF vector for `text`
    ///
    /// Returns a zero vector when the text has no n-grams in the vocabulary.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.dims()];
        for gram in char_ngrams(text) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                vector[idx] += 1.0;
            }
        }

        for (value, weight) in vector.iter_mut().zip(&self.idf) {
            *value *= weight;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in vector.iter_mut() {
                *value /= norm;
            }
        }
        vector
    }
}

/// Cosine similarity of TF-IDF character 1–3-gram vectors
///
/// 0.0 when either side is empty or yields no n-grams.
pub fn cosine_similarity(text_a: &str, text_b: &str) -> MetricResult {
    let text_a = text_a.trim();
    let text_b = text_b.trim();
    if text_a.is_empty() || text_b.is_empty() {
        return MetricResult::new(MetricKind::CosineSimilarity, 0.0);
    }

    let model = TfIdfModel::fit(&[text_a, text_b]);
    let vec_a = model.transform(text_a);
    let vec_b = model.transform(text_b);

    MetricResult::new(MetricKind::CosineSimilarity, cosine(&vec_a, &vec_b))
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Character n-grams of the lowercased text with whitespace runs collapsed
fn char_ngrams(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    let mut chars: Vec<char> = Vec::with_capacity(lowered.len());
    let mut prev_space = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !prev_space {
                chars.push(' ');
            }
            prev_space = true;
        } else {
            chars.push(c);
            prev_space = false;
        }
    }

    let mut grams = Vec::new();
    for n in MIN_NGRAM..=MAX_NGRAM {
        if chars.len() < n {
            break;
        }
        for window in chars.windows(n) {
            grams.push(window.iter().collect());
        }
    }
    grams
}
