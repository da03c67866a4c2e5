// Text normalizer
//
// Every metric asks for the cleaned form it needs: character-level metrics
// want the text nearly verbatim, word-level metrics want lowercase tokens.

use std::collections::HashSet;

/// Which cleaned form a metric needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationMode {
    /// Trim surrounding whitespace, keep everything else (case included)
    Character,
    /// Lowercase, strip punctuation, split on whitespace runs
    Word,
}

/// Cleaned view of a raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanedText {
    Characters(String),
    Words(Vec<String>),
}

impl CleanedText {
    /// True when nothing survived normalization
    pub fn is_empty(&self) -> bool {
        match self {
            CleanedText::Characters(text) => text.is_empty(),
            CleanedText::Words(words) => words.is_empty(),
        }
    }
}

/// Normalize raw text for the requested mode
///
/// Empty and whitespace-only input produce an empty result, never an error.
pub fn normalize(raw: &str, mode: NormalizationMode) -> CleanedText {
    match mode {
        NormalizationMode::Character => CleanedText::Characters(raw.trim().to_string()),
        NormalizationMode::Word => CleanedText::Words(tokenize(raw)),
    }
}

/// Lowercase word tokens with punctuation removed
fn tokenize(raw: &str) -> Vec<String> {
    let stripped: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

/// Unique characters of the character-mode text
pub fn char_set(raw: &str) -> HashSet<char> {
    raw.trim().chars().collect()
}

/// Unique word-mode tokens
pub fn word_set(raw: &str) -> HashSet<String> {
    tokenize(raw).into_iter().collect()
}
