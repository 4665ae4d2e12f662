//! CLI configuration loading
//!
//! Loads `~/.config/hcd/config.toml` (or the file named by `HCD_CONFIG`).
//! A missing file means defaults. `HCD_API_URL` overrides the backend URL,
//! and the `--api-url` flag overrides both.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Root configuration for the `hcd` binary
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HcdConfig {
    /// Base URL of the classification backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout; classification of a long report is slow
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Where the remembered annotator name lives
    #[serde(default = "default_annotator_file")]
    pub annotator_file: String,
}

fn default_api_url() -> String {
    "https://siip-hcd-classifier-997139946856.us-central1.run.app".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_annotator_file() -> String {
    "~/.config/hcd/annotator.json".to_string()
}

impl Default for HcdConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            annotator_file: default_annotator_file(),
        }
    }
}

impl HcdConfig {
    /// Environment variable for config path override
    pub const ENV_CONFIG_PATH: &'static str = "HCD_CONFIG";

    /// Environment variable for backend URL override
    pub const ENV_API_URL: &'static str = "HCD_API_URL";

    /// Default config filename
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "config.toml";

    /// Load configuration from file, then apply environment overrides.
    ///
    /// Resolution order:
    /// 1. `HCD_CONFIG` environment variable
    /// 2. `~/.config/hcd/config.toml`
    pub fn load() -> Result<Self> {
        let path = Self::resolve_config_path();

        let cfg = if path.exists() {
            Self::load_from_path(&path)?
        } else {
            tracing::info!(path = %path.display(), "config not found, using defaults");
            Self::default()
        };

        let cfg = cfg.with_overrides(|key| std::env::var(key).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML string
    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: HcdConfig = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply environment overrides through `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(Self::ENV_API_URL).filter(|url| !url.trim().is_empty()) {
            tracing::debug!(api_url = %url, "backend URL overridden from environment");
            self.api_url = url;
        }
        self
    }

    /// Apply the command-line URL, which wins over file and environment.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Result<Self> {
        if let Some(url) = api_url {
            self.api_url = url;
            self.validate()?;
        }
        Ok(self)
    }

    fn resolve_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(Self::ENV_CONFIG_PATH) {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .map(|h| {
                h.join(".config")
                    .join("hcd")
                    .join(Self::DEFAULT_CONFIG_FILENAME)
            })
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_CONFIG_FILENAME))
    }

    fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_url must not be empty".to_string()));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api_url must be an http(s) URL, got {}",
                self.api_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Annotator file path with `~/` expanded
    pub fn resolved_annotator_file(&self) -> PathBuf {
        let path = &self.annotator_file;
        if let Some(stripped) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(stripped);
        }
        PathBuf::from(path)
    }
}
