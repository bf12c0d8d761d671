//! Configuration management

use crate::error::{ErrorContext, LangscanError, LangscanResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration for the scanning pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LangscanConfig {
    /// Directory holding cached repository snapshots
    pub cache_dir: PathBuf,
    /// Base URL of the hosting API
    pub api_base_url: String,
    /// Per-request timeout for API calls, in seconds
    pub request_timeout_secs: u64,
    /// Per-repository timeout during account-wide aggregation, in seconds
    pub repo_timeout_secs: u64,
    /// Bound on concurrently scanned repositories during account-wide
    /// aggregation
    pub max_concurrent_repos: usize,
    /// Page size for repository listing requests
    pub page_size: usize,
}

impl Default for LangscanConfig {
    fn default() -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("langscan");

        Self {
            cache_dir,
            api_base_url: "https://api.github.com".to_string(),
            request_timeout_secs: 30,
            repo_timeout_secs: 60,
            max_concurrent_repos: 8,
            page_size: 100,
        }
    }
}

impl LangscanConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> LangscanResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LangscanError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: LangscanConfig =
            toml::from_str(&content).map_err(|e| LangscanError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> LangscanResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| LangscanError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| LangscanError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> LangscanResult<()> {
        if self.max_concurrent_repos == 0 {
            return Err(LangscanError::Config {
                message: "max_concurrent_repos must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set max_concurrent_repos to a positive value"),
            });
        }

        if self.page_size == 0 || self.page_size > 100 {
            return Err(LangscanError::Config {
                message: "page_size must be between 1 and 100".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("The hosting API caps per_page at 100"),
            });
        }

        if self.request_timeout_secs == 0 || self.repo_timeout_secs == 0 {
            return Err(LangscanError::Config {
                message: "timeouts must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config").with_operation("validate"),
            });
        }

        Ok(())
    }

    /// Bearer token from the process environment, if any
    pub fn access_token_from_env() -> Option<String> {
        std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty())
    }
}
