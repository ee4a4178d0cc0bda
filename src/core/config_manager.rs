// src/core/config_manager.rs
//! Configuration loading: `.env`, then `config.yaml`, then environment
//! variables, then command-line overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const DEFAULT_LOG_FILE: &str = "/tmp/job-board.log";
const BASE_URL_VAR: &str = "BASE_URL";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    /// The config file that was read, if one existed.
    pub config_file: Option<PathBuf>,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend address without trailing slashes; `None` when unset or empty.
    pub base_url: Option<String>,
    /// Per-request timeout. Requests never time out when unset.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// One environment's block in `config.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
struct EnvironmentSection {
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl ConfigManager {
    /// Load configuration for the current environment. Runs before logging
    /// is set up, so nothing is logged here; see `log_summary`.
    pub fn load(config_path: &Path, base_url_override: Option<&str>) -> Result<Self> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();

        let environment = Self::get_environment();
        let section = Self::load_section(config_path, &environment)?;
        let env_base_url = std::env::var(BASE_URL_VAR).ok();

        let mut config = Self::resolve(
            environment,
            section,
            env_base_url.as_deref(),
            base_url_override,
        );
        config.config_file = config_path.exists().then(|| config_path.to_path_buf());
        Ok(config)
    }

    /// Report where the configuration came from. Call once the subscriber is
    /// installed.
    pub fn log_summary(&self) {
        info!("Environment: {}", self.environment);
        match &self.config_file {
            Some(path) => info!("Configuration file: {}", path.display()),
            None => info!("No configuration file, using environment only"),
        }
        info!(
            "Backend: {}",
            self.api.base_url.as_deref().unwrap_or("<not configured>")
        );
        if let Some(secs) = self.api.timeout_seconds {
            info!("Request timeout: {}s", secs);
        }
    }

    fn get_environment() -> String {
        std::env::var("JOB_BOARD_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_section(config_path: &Path, environment: &str) -> Result<EnvironmentSection> {
        if !config_path.exists() {
            return Ok(EnvironmentSection::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    /// Later sources win: file, then environment variable, then override.
    fn resolve(
        environment: String,
        section: EnvironmentSection,
        env_base_url: Option<&str>,
        base_url_override: Option<&str>,
    ) -> Self {
        let raw_base_url = base_url_override
            .or(env_base_url)
            .or(section.base_url.as_deref())
            .unwrap_or_default();

        Self {
            environment,
            config_file: None,
            api: ApiConfig {
                base_url: normalize_base_url(raw_base_url),
                timeout_seconds: section.timeout_seconds,
            },
            logging: LoggingConfig {
                file: section
                    .log_file
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            },
        }
    }
}

/// Strip trailing slashes; an empty result means "not configured".
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
