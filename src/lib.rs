// textsim - Multi-metric text similarity engine
// Library exports

pub mod compare; // Result aggregation and degraded-mode fallback
pub mod config;
pub mod errors;
pub mod metrics; // Lexical and TF-IDF vector metrics
pub mod oracle; // Semantic oracle providers and output parsing
pub mod server; // HTTP transport
pub mod text;

pub use compare::{compare, CompareConfig, Comparator, ComparisonResult};
