// Comparison engine
//
// Runs the deterministic metrics and the semantic oracle for one pair of texts
// and merges them into a single result that is always usable.

mod aggregator;
mod types;

pub use aggregator::{compare, Comparator};
pub use types::{CompareConfig, ComparisonResult, OracleFailure, TextStats, WordBreakdown};
