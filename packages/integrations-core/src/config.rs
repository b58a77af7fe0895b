//! Console configuration and its persistence.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::hidden::HiddenCredentialsConfig;
use crate::Result;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8006";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Settings for talking to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Platform API base URL
    pub base_url: String,
    /// Web frontend base URL, used for links
    pub frontend_url: String,
    /// API key sent as a bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Hidden system credential identifiers
    pub hidden_credentials: HiddenCredentialsConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            api_key: None,
            hidden_credentials: HiddenCredentialsConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Default config file path.
    ///
    /// Default path: `~/.config/integrations-console/config.toml`
    /// Can be overridden with `INTEGRATIONS_CONSOLE_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("INTEGRATIONS_CONSOLE_CONFIG") {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("integrations-console/config.toml"))
            .unwrap_or_else(|| PathBuf::from("integrations-console.toml"))
    }

    /// Load from a path; a missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: ConsoleConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from the default path and apply environment overrides.
    pub fn load() -> Result<Self> {
        let config = Self::load_from_path(&Self::default_path())?;
        Ok(config.with_overrides(|name| env::var(name).ok()))
    }

    /// Apply `AGPT_BASE_URL`, `AGPT_FRONTEND_URL`, `AUTOGPT_API_KEY` and the
    /// hidden credential variables on top of the file values.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("AGPT_BASE_URL") {
            self.base_url = url;
        }
        if let Some(url) = non_empty("AGPT_FRONTEND_URL") {
            self.frontend_url = url;
        }
        if let Some(key) = non_empty("AUTOGPT_API_KEY") {
            self.api_key = Some(key);
        }
        let from_env = HiddenCredentialsConfig::from_lookup(&lookup);
        self.hidden_credentials = self.hidden_credentials.merged_with(&from_env);
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hidden::HiddenCredentialKey;
    use crate::Error;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = ConsoleConfig::load_from_path(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.base_url, "http://localhost:8006");
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
base_url = "https://platform.example.com"

[hidden_credentials]
openai = "sys-openai"
google_maps = "sys-maps"
"#,
        )
        .unwrap();

        let config = ConsoleConfig::load_from_path(&path).unwrap();
        assert_eq!(config.base_url, "https://platform.example.com");
        assert_eq!(config.frontend_url, DEFAULT_FRONTEND_URL);
        assert_eq!(
            config.hidden_credentials.get(HiddenCredentialKey::GoogleMaps),
            Some("sys-maps")
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [").unwrap();

        let result = ConsoleConfig::load_from_path(&path);
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_unknown_hidden_key_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[hidden_credentials]\nnot_a_provider = \"x\"\n").unwrap();

        assert!(ConsoleConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("AGPT_BASE_URL", "http://api.local:9000/"),
            ("AUTOGPT_API_KEY", "secret"),
            ("AGPT_FRONTEND_URL", ""),
            ("HIDDEN_CRED_EXA", "sys-exa"),
        ]
        .into_iter()
        .collect();

        let config = ConsoleConfig::default()
            .with_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://api.local:9000");
        assert_eq!(config.frontend_url, DEFAULT_FRONTEND_URL);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(
            config.hidden_credentials.get(HiddenCredentialKey::Exa),
            Some("sys-exa")
        );
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        let mut config = ConsoleConfig::default();
        config.api_key = Some("k".to_string());
        config
            .hidden_credentials
            .set(HiddenCredentialKey::Ollama, "sys-ollama");

        config.save_to_path(&path).unwrap();
        let loaded = ConsoleConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
