mod api;

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::error::Result;

pub use api::ApiConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { verbose: None }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub default_user: Option<String>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self { default_user: None }
    }
}

pub struct Config {
    /// Bearer token for the agent runtime; only the chat path needs it
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub user_id: String,
    pub stream_timeout: u64,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = FileConfig::load()?;

        // API key comes from the environment only (kept out of config
        // files for security)
        let api_key = env::var("FINCHAT_API_KEY").ok();

        // Endpoint: CLI args > env var > config file > default
        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env::var("FINCHAT_API_ENDPOINT").ok())
            .or(file_config.api.endpoint.clone())
            .unwrap_or_else(|| "http://localhost:7777".to_string());
        let api_endpoint = normalize_endpoint(&api_endpoint);

        // User id: CLI args > env var > config file > default
        let user_id = args
            .user
            .clone()
            .or_else(|| env::var("FINCHAT_USER").ok())
            .or(file_config.user.default_user.clone())
            .unwrap_or_else(|| "default".to_string());

        // Stream timeout: env var > config file > default
        let stream_timeout = env::var("FINCHAT_STREAM_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.api.stream_timeout)
            .unwrap_or(30);

        // Verbose flag: env var > config file > default
        let verbose = env::var("FINCHAT_VERBOSE")
            .ok()
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
            .or(file_config.session.verbose)
            .unwrap_or(false);

        Ok(Config {
            api_key,
            api_endpoint,
            user_id,
            stream_timeout,
            verbose,
        })
    }
}

/// Accept a bare base URL, a `/v1` base, or a full runs URL.
fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.ends_with("/v1/runs") {
        endpoint.to_string()
    } else if endpoint.ends_with("/v1") {
        format!("{}/runs", endpoint)
    } else if endpoint.ends_with("/v1/") {
        format!("{}runs", endpoint)
    } else {
        format!("{}/v1/runs", endpoint.trim_end_matches('/'))
    }
}

impl FileConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_paths = Self::get_config_paths();

        for path in config_paths {
            if path.exists() {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

                let config: FileConfig = if path.extension().and_then(|s| s.to_str())
                    == Some("yaml")
                    || path.extension().and_then(|s| s.to_str()) == Some("yml")
                {
                    serde_yaml::from_str(&contents).with_context(|| {
                        format!("Failed to parse YAML config file: {}", path.display())
                    })?
                } else {
                    serde_json::from_str(&contents).with_context(|| {
                        format!("Failed to parse JSON config file: {}", path.display())
                    })?
                };

                return Ok(config);
            }
        }

        // No config file found, return default
        Ok(FileConfig::default())
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory (highest priority - local override)
        paths.push(PathBuf::from(".finchat.yaml"));
        paths.push(PathBuf::from(".finchat.yml"));
        paths.push(PathBuf::from(".finchat.json"));

        // 2. User's config directory (global config)
        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("finchat");
            paths.push(config_dir.join("finchat.yaml"));
            paths.push(config_dir.join("finchat.yml"));
            paths.push(config_dir.join("finchat.json"));
        }

        paths
    }
}
