// Text normalization module
// Public interface for turning raw input into metric-ready forms

mod normalize;

pub use normalize::{char_set, normalize, word_set, CleanedText, NormalizationMode};
