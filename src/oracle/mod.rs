// Semantic oracle support
//
// The oracle is an external generative model asked to judge how similar two
// texts are. It sits behind the `SemanticOracle` trait so the comparison
// engine never sees a concrete transport, and tests can swap in a stub.

use async_trait::async_trait;

mod error;
mod http;
pub mod parser;
pub mod prompt;
pub mod types;

// Provider implementations
pub mod claude;
pub mod gemini;
pub mod openai;

// Provider factory
pub mod factory;

pub use error::OracleError;
pub use factory::create_oracle;
pub use parser::parse_oracle_output;
pub use prompt::build_prompt;
pub use types::{Availability, OracleResponse};

/// Capability to ask an external model for a free-form answer
///
/// Implementations make exactly one attempt per call. Timeouts are enforced by
/// the caller as well, so a hung transport cannot stall a comparison.
#[async_trait]
pub trait SemanticOracle: Send + Sync {
    /// Send the prompt and return the model's raw text output
    async fn invoke(&self, prompt: &str) -> Result<String, OracleError>;

    /// Provider name (e.g., "gemini", "claude", "openai")
    fn name(&self) -> &str;

    /// Model the provider talks to
    fn model(&self) -> &str;
}
