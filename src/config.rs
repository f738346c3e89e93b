use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::documents::DEFAULT_MAX_EXCERPT_CHARS;
use crate::llm::gigachat::{DEFAULT_API_URL, DEFAULT_MODEL, GigaChatConfig};

/// Environment variable overriding the endpoint
pub const API_URL_ENV: &str = "GIGACHAT_API_URL";

/// Environment variable overriding the model
pub const MODEL_ENV: &str = "GIGACHAT_MODEL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub llm: LlmConfig,
    pub documents: DocumentsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_url: String,
    pub model: String,
    pub timeout_ms: u64,
    /// Name of the environment variable holding the bearer token
    pub api_key_env: String,
    /// Inline token; takes precedence over `api_key_env`
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: 30000,
            api_key_env: "GIGACHAT_API_KEY".to_string(),
            api_key: None,
        }
    }
}

impl LlmConfig {
    /// Bearer token, if one is configured. Absence means offline mode.
    pub fn credential(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn to_gigachat_config(&self) -> GigaChatConfig {
        GigaChatConfig {
            api_url: self.api_url.clone(),
            model: self.model.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    pub max_excerpt_chars: usize,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            max_excerpt_chars: DEFAULT_MAX_EXCERPT_CHARS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            llm: LlmConfig::default(),
            documents: DocumentsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Endpoint and model may be overridden from the environment
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            log::debug!("{} overrides api_url", API_URL_ENV);
            self.llm.api_url = url;
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.is_empty()) {
            log::debug!("{} overrides model", MODEL_ENV);
            self.llm.model = model;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.api_url, DEFAULT_API_URL);
        assert_eq!(config.llm.model, "GigaChat");
        assert_eq!(config.llm.timeout_ms, 30000);
        assert_eq!(config.documents.max_excerpt_chars, 2000);
    }

    #[test]
    fn test_load_explicit_file_with_partial_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("careerist.yml");
        fs::write(
            &path,
            "llm:\n  model: GigaChat-Pro\n  timeout_ms: 5000\ndocuments:\n  max_excerpt_chars: 500\n",
        )
        .unwrap();

        let config = Config::load_file_chain(Some(&path)).unwrap();
        assert_eq!(config.llm.model, "GigaChat-Pro");
        assert_eq!(config.llm.timeout_ms, 5000);
        assert_eq!(config.llm.api_url, DEFAULT_API_URL);
        assert_eq!(config.documents.max_excerpt_chars, 500);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.yml");
        assert!(Config::load_file_chain(Some(&path)).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            API_URL_ENV => Some("http://127.0.0.1:8080/v1/chat/completions".to_string()),
            MODEL_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.llm.api_url, "http://127.0.0.1:8080/v1/chat/completions");
        assert_eq!(config.llm.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_credential_prefers_inline_key_and_ignores_blank() {
        let mut llm = LlmConfig {
            api_key: Some("inline".to_string()),
            api_key_env: "CAREERIST_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(llm.credential().as_deref(), Some("inline"));

        llm.api_key = Some("   ".to_string());
        assert!(llm.credential().is_none());
    }

    #[test]
    fn test_to_gigachat_config() {
        let llm = LlmConfig {
            timeout_ms: 1500,
            ..Default::default()
        };
        let giga = llm.to_gigachat_config();
        assert_eq!(giga.timeout, Duration::from_millis(1500));
        assert_eq!(giga.model, DEFAULT_MODEL);
    }
}
