// User-friendly error messages
//
// Provides helpers to convert technical errors into actionable messages
// that guide users toward solutions.

use anyhow::{Context, Result};
use std::fmt;

/// Wrap an error with user-friendly context
pub trait UserFriendlyError {
    /// Add user-friendly context to this error
    fn user_context(self, message: &str) -> Self;

    /// Add user-friendly context with a suggestion
    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self;
}

impl<T> UserFriendlyError for Result<T> {
    fn user_context(self, message: &str) -> Self {
        self.with_context(|| message.to_string())
    }

    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self {
        self.with_context(|| {
            format!(
                "{}\n\n\x1b[1;33mSuggestion:\x1b[0m {}",
                problem, suggestion
            )
        })
    }
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(error: &str) -> String {
    format!(
        "Failed to parse config file\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat ~/.textsim/config.toml\x1b[0m\n\n\
        2. Known sections are [oracle], [compare] and [server]\n\n\
        3. Common mistakes:\n\
           • Missing quotes around strings\n\
           • Unclosed brackets []\n\
           • Numbers written as strings (oracle_timeout_ms = \"10000\")",
        error
    )
}

/// Explain how to enable the semantic oracle when no API key is set
pub fn api_key_missing_message(provider: &str, env_var: Option<&str>) -> String {
    let env_hint = match env_var {
        Some(var) => format!("export {}=\"...\"", var),
        None => "set api_key under [oracle]".to_string(),
    };
    format!(
        "No API key configured for the {} oracle; AI analysis is disabled.\n\
        Only lexical and vector metrics will be reported.\n\n\
        \x1b[1;32mTo enable it:\x1b[0m\n\
        1. Add api_key under [oracle] in ~/.textsim/config.toml, or\n\
        2. \x1b[36m{}\x1b[0m",
        provider, env_hint
    )
}

/// Format a bind failure with helpful suggestions
pub fn bind_failed_error(address: &str) -> String {
    format!(
        "Could not listen on {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • Another process is using the port\n\
        • Invalid bind address\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Pick another address:\n\
           \x1b[36mtextsim serve --bind 127.0.0.1:5050\x1b[0m\n\n\
        2. Or set it in the environment:\n\
           \x1b[36mexport TEXTSIM_BIND=127.0.0.1:5050\x1b[0m",
        address
    )
}

/// Wrap a generic error with suggestions
pub fn wrap_error_with_suggestion(error: impl fmt::Display, suggestion: &str) -> String {
    format!(
        "{}\n\n\
        \x1b[1;33mSuggestion:\x1b[0m {}",
        error, suggestion
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_missing_names_env_var() {
        let msg = api_key_missing_message("gemini", Some("GEMINI_API_KEY"));
        assert!(msg.contains("GEMINI_API_KEY"));
        assert!(msg.contains("config.toml"));
    }

    #[test]
    fn test_bind_failed_has_suggestion() {
        let msg = bind_failed_error("127.0.0.1:5000");
        assert!(msg.contains("--bind"));
        assert!(msg.contains("TEXTSIM_BIND"));
    }

    #[test]
    fn test_user_context_wraps_error() {
        let result: Result<()> = Err(anyhow::anyhow!("permission denied"));
        let err = result.user_context("Failed to read config file").unwrap_err();
        assert_eq!(err.to_string(), "Failed to read config file");
        assert!(format!("{:#}", err).contains("permission denied"));
    }

    #[test]
    fn test_user_context_with_suggestion() {
        let result: Result<()> = Err(anyhow::anyhow!("boom"));
        let err = result
            .user_context_with_suggestion("Could not read input", "Check the path")
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Check the path"));
    }
}
