// Oracle factory
//
// Creates the configured oracle provider, if any

use anyhow::{bail, Result};
use std::sync::Arc;
use std::time::Duration;

use super::claude::ClaudeOracle;
use super::gemini::GeminiOracle;
use super::openai::OpenAIOracle;
use super::SemanticOracle;
use crate::config::OracleSettings;

/// Create an oracle from settings
///
/// Returns `Ok(None)` when no API key is configured: comparisons then run in
/// degraded mode. Unknown provider names are a configuration error.
pub fn create_oracle(settings: &OracleSettings) -> Result<Option<Arc<dyn SemanticOracle>>> {
    let provider_name = settings.provider.as_str();

    let api_key = match &settings.api_key {
        Some(key) if !key.trim().is_empty() => key.trim().to_string(),
        _ => {
            if !matches!(provider_name, "gemini" | "claude" | "openai") {
                bail!("Unknown oracle provider: {}", provider_name);
            }
            return Ok(None);
        }
    };
    let timeout = Duration::from_millis(settings.request_timeout_ms);

    let oracle: Arc<dyn SemanticOracle> = match provider_name {
        "gemini" => {
            let mut oracle = GeminiOracle::new(api_key, timeout)?;
            if let Some(model) = &settings.model {
                oracle = oracle.with_model(model.clone());
            }
            if let Some(base_url) = &settings.base_url {
                oracle = oracle.with_base_url(base_url.clone());
            }
            Arc::new(oracle)
        }

        "claude" => {
            let mut oracle = ClaudeOracle::new(api_key, timeout)?.with_max_tokens(settings.max_tokens);
            if let Some(model) = &settings.model {
                oracle = oracle.with_model(model.clone());
            }
            if let Some(base_url) = &settings.base_url {
                oracle = oracle.with_base_url(base_url.clone());
            }
            Arc::new(oracle)
        }

        "openai" => {
            let mut oracle = OpenAIOracle::new(api_key, timeout)?.with_max_tokens(settings.max_tokens);
            if let Some(model) = &settings.model {
                oracle = oracle.with_model(model.clone());
            }
            if let Some(base_url) = &settings.base_url {
                oracle = oracle.with_base_url(base_url.clone());
            }
            Arc::new(oracle)
        }

        _ => bail!("Unknown oracle provider: {}", provider_name),
    };

    tracing::info!(provider = oracle.name(), model = oracle.model(), "Semantic oracle configured");
    Ok(Some(oracle))
}
