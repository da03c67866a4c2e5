// Configuration loader
// Loads settings from ~/.textsim/config.toml (or an explicit path) and the environment

use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;
use crate::errors::{config_parse_error, UserFriendlyError};

/// ~/.textsim/config.toml, if a home directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".textsim/config.toml"))
}

/// Load configuration
///
/// An explicit path must exist. Without one, the default path is used when
/// present and built-in defaults otherwise. Environment variables fill in
/// whatever the file leaves unset.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            read_config_file(path)?
        }
        None => match default_config_path() {
            Some(path) if path.exists() => read_config_file(&path)?,
            _ => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .user_context(&format!("Failed to read config file {}", path.display()))?;

    let config = parse_config(&contents)?;
    tracing::info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Parse config.toml contents
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| anyhow::anyhow!(config_parse_error(&e.to_string())))
}

/// Fill unset values from the environment
///
/// `lookup` is `std::env::var` in production; tests pass a map instead.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(provider) = non_empty("TEXTSIM_ORACLE_PROVIDER") {
        config.oracle.provider = provider.trim().to_lowercase();
    }

    if !config.oracle.is_configured() {
        if let Some(api_key) = config.oracle.api_key_env_var().and_then(|var| non_empty(var)) {
            config.oracle.api_key = Some(api_key);
        }
    }

    if let Some(bind) = non_empty("TEXTSIM_BIND") {
        config.server.bind_address = bind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.oracle.provider, "gemini");
        assert!(!config.oracle.is_configured());
        assert!(config.compare.enable_semantic_oracle);
        assert_eq!(config.compare.oracle_timeout_ms, 10_000);
        assert_eq!(config.server.bind_address, "127.0.0.1:5000");
    }

    #[test]
    fn test_parse_sections() {
        let config = parse_config(
            r#"
            [oracle]
            provider = "claude"
            api_key = "sk-ant-test"
            model = "claude-haiku"

            [compare]
            enable_semantic_oracle = false
            oracle_timeout_ms = 2500

            [server]
            bind_address = "0.0.0.0:8080"
            "#,
        )
        .unwrap();

        assert_eq!(config.oracle.provider, "claude");
        assert_eq!(config.oracle.model.as_deref(), Some("claude-haiku"));
        assert!(!config.compare.enable_semantic_oracle);
        assert_eq!(config.compare.oracle_timeout_ms, 2500);
        assert_eq!(config.compare.excerpt_chars, 500);
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_toml_has_helpful_message() {
        let err = parse_config("[oracle\nprovider = ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_fills_missing_api_key() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, env(&[("GEMINI_API_KEY", "AIza-test")]));
        assert_eq!(config.oracle.api_key.as_deref(), Some("AIza-test"));
    }

    #[test]
    fn test_file_key_wins_over_env() {
        let mut config = parse_config("[oracle]\napi_key = \"from-file\"").unwrap();
        apply_env_overrides(&mut config, env(&[("GEMINI_API_KEY", "from-env")]));
        assert_eq!(config.oracle.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_provider_override_selects_matching_key() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("TEXTSIM_ORACLE_PROVIDER", "OpenAI"),
                ("OPENAI_API_KEY", "sk-test"),
                ("GEMINI_API_KEY", "AIza-test"),
                ("TEXTSIM_BIND", "0.0.0.0:9000"),
            ]),
        );
        assert_eq!(config.oracle.provider, "openai");
        assert_eq!(config.oracle.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[compare]\noracle_timeout_ms = 1234").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.compare.oracle_timeout_ms, 1234);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("nope.toml").as_path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_unreadable_config_names_the_path() {
        // A directory exists but cannot be read as a file
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path())).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to read config file"));
        assert!(message.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = parse_config("[oracle]\napi_key = \"secret-key\"").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
    }
}
