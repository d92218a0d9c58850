// src/config.rs
//! Environment-aware application configuration

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_API_URL: &str = "http://localhost:3003";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub data_dir: PathBuf,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_environment() -> String {
    "local".to_string()
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: AppConfig,
    production: AppConfig,
}

impl AppConfig {
    /// Load configuration for the current environment.
    ///
    /// A `config.yaml` with `local` and `production` sections takes
    /// precedence when present; otherwise environment variables fill in the
    /// gaps over built-in defaults.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = PathBuf::from("config.yaml");
        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path, &environment)?
        } else {
            Self::defaults(&environment)
        };

        if let Ok(url) = std::env::var("LINKSCOUT_API_URL") {
            config.api_base_url = url;
        }
        if let Ok(dir) = std::env::var("LINKSCOUT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.environment = environment;

        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("LINKSCOUT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(path: &PathBuf, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile =
            serde_yaml::from_str(&content).context("Failed to parse config.yaml")?;

        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    fn defaults(environment: &str) -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(".linkscout"),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            environment: environment.to_string(),
        }
    }

    /// Where the working-list session is persisted between invocations.
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    /// Where the bearer token is cached.
    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join("token")
    }

    /// Ensure the data directory exists.
    pub async fn ensure_data_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .with_context(|| {
                format!("Failed to create data directory: {}", self.data_dir.display())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_local_base_url() {
        let config = AppConfig::defaults("local");
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert_eq!(
            config.session_path(),
            PathBuf::from(".linkscout/session.json")
        );
    }

    #[test]
    fn test_config_file_selects_environment_section() {
        let yaml = r#"
local:
  api_base_url: http://localhost:3003
  data_dir: .linkscout
production:
  api_base_url: https://sourcing.example.com
  data_dir: /var/lib/linkscout
  timeout_seconds: 60
"#;
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.local.api_base_url, "http://localhost:3003");
        assert_eq!(file.production.api_base_url, "https://sourcing.example.com");
        assert_eq!(file.production.timeout_seconds, 60);
        assert_eq!(file.local.timeout_seconds, DEFAULT_TIMEOUT_SECS);
    }
}
