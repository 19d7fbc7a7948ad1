//! Configuration for civiq.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: CensusApiConfig,
    pub answers: AnswerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: CensusApiConfig::default(),
            answers: AnswerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("civiq.toml"),
            PathBuf::from("config.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("civiq/config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".civiq/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.is_file() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::MissingField("api.base_url".to_string()).into());
        }
        if url::Url::parse(&self.api.base_url).is_err() {
            return Err(ConfigError::Invalid(format!(
                "api.base_url is not an absolute URL: {}",
                self.api.base_url
            ))
            .into());
        }
        if self.api.release.is_empty() {
            return Err(ConfigError::MissingField("api.release".to_string()).into());
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be > 0".to_string()).into());
        }
        if self.answers.max_results == 0 {
            return Err(ConfigError::Invalid("answers.max_results must be > 0".to_string()).into());
        }
        Ok(())
    }
}

/// Census Reporter API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CensusApiConfig {
    /// Base URL of the Census Reporter API
    pub base_url: String,
    /// ACS release identifier used for statistics lookups
    pub release: String,
    /// Timeout applied to every outbound request, in seconds
    pub timeout_secs: u64,
}

impl Default for CensusApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.censusreporter.org/1.0".to_string(),
            release: "acs2011_5yr".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Answer aggregation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    /// Maximum number of matches a parser may return for one question
    pub max_results: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self { max_results: 5 }
    }
}
