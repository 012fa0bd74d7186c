use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Directory holding the config file, relative to the working directory
pub const CONFIG_DIR: &str = ".clara";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Extension filter used when none is given (e.g. "jpeg")
    #[serde(default)]
    pub extension: Option<String>,

    /// Counter value for the first renamed file
    #[serde(default = "default_start_number")]
    pub start_number: i64,

    /// Default output format: "summary" or "json"
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            extension: None,
            start_number: default_start_number(),
            output: default_output(),
        }
    }
}

fn default_start_number() -> i64 {
    1
}

fn default_output() -> String {
    "summary".to_string()
}

impl Config {
    /// Load config from .clara/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}
