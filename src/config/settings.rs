// Configuration structs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::compare::CompareConfig;

/// Top-level configuration, as read from config.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Semantic oracle provider settings
    pub oracle: OracleSettings,

    /// Comparison behaviour (oracle toggle, timeout, prompt excerpt size)
    pub compare: CompareConfig,

    /// HTTP server settings
    pub server: ServerConfig,
}

/// Which external model to ask, and how
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleSettings {
    /// Provider type: "gemini", "claude" or "openai"
    pub provider: String,

    /// API key; without one the oracle is simply not configured
    pub api_key: Option<String>,

    /// Model override (provider default when unset)
    pub model: Option<String>,

    /// API root override (proxies, compatible servers, tests)
    pub base_url: Option<String>,

    /// Transport-level HTTP timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Output budget for providers that require one
    pub max_tokens: u32,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            api_key: None,
            model: None,
            base_url: None,
            request_timeout_ms: 30_000,
            max_tokens: 1024,
        }
    }
}

impl OracleSettings {
    /// True when an API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self.provider.as_str() {
            "gemini" => Some("GEMINI_API_KEY"),
            "claude" => Some("ANTHROPIC_API_KEY"),
            "openai" => Some("OPENAI_API_KEY"),
            _ => None,
        }
    }
}

// Keeps API keys out of logs
impl fmt::Debug for OracleSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleSettings")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Configuration for the HTTP server
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5000")
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
        }
    }
}
