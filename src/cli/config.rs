// ABOUTME: Configuration management for the conveyor application
// ABOUTME: Handles loading configuration from a YAML file with environment overrides

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_DEST_PATH: &str = "users.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_source_url")]
    pub source_url: String,

    #[serde(default = "default_dest_path")]
    pub dest_path: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_dest_path() -> PathBuf {
    PathBuf::from(DEFAULT_DEST_PATH)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            dest_path: default_dest_path(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, the default location, or
    /// fall back to defaults when no file exists.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::default_config_path(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env();
        Ok(config)
    }

    fn default_config_path() -> PathBuf {
        std::env::var("CONVEYOR_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("conveyor.yaml"))
    }

    fn merge_env(&mut self) {
        if let Ok(url) = std::env::var("CONVEYOR_SOURCE_URL") {
            self.source_url = url;
        }
        if let Ok(path) = std::env::var("CONVEYOR_DEST_PATH") {
            self.dest_path = PathBuf::from(path);
        }
        if let Ok(level) = std::env::var("CONVEYOR_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}
