//! # Configuration
//!
//! Settings live in `config.json` inside the data directory. The directory is
//! `$SYSMETIC_HOME` when set, otherwise the OS data directory chosen by the
//! `directories` crate.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `SYSMETIC_API_URL`, `SYSMETIC_TOKEN`
//! 2. **Config file**: `config.json`
//! 3. **Defaults**
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_url` | `http://localhost:8080` | Base URL of the marketplace API |
//! | `page_size` | `10` | Rows per page for client-paged lists |
//! | `timeout_secs` | `10` | HTTP request timeout |
//! | `token` | none | Bearer token forwarded with every request |

use crate::error::{Result, SysmeticError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const KEYS: [&str; 4] = ["api_url", "page_size", "timeout_secs", "token"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SysmeticConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SysmeticConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token: None,
        }
    }
}

/// The directory holding `config.json`.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("SYSMETIC_HOME") {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "sysmetic", "sysmetic")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SysmeticError::Config("Could not determine a data directory".to_string()))
}

impl SysmeticConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: SysmeticConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Load and then apply environment overrides.
    pub fn resolve<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let mut config = Self::load(config_dir)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `SYSMETIC_API_URL` / `SYSMETIC_TOKEN` as looked up by `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SYSMETIC_API_URL").filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(token) = lookup("SYSMETIC_TOKEN").filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_url" => Some(self.api_url.clone()),
            "page_size" => Some(self.page_size.to_string()),
            "timeout_secs" => Some(self.timeout_secs.to_string()),
            "token" => Some(self.token.clone().unwrap_or_default()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "api_url" => {
                let url = value.trim().trim_end_matches('/');
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(format!(
                        "api_url must start with http:// or https://, got '{}'",
                        value
                    ));
                }
                self.api_url = url.to_string();
            }
            "page_size" => {
                let size: usize = value
                    .parse()
                    .map_err(|_| format!("page_size must be a positive number, got '{}'", value))?;
                if size == 0 {
                    return Err("page_size must be at least 1".to_string());
                }
                self.page_size = size;
            }
            "timeout_secs" => {
                self.timeout_secs = value
                    .parse()
                    .map_err(|_| format!("timeout_secs must be a number, got '{}'", value))?;
            }
            "token" => {
                self.token = (!value.is_empty()).then(|| value.to_string());
            }
            _ => {
                return Err(format!(
                    "Unknown config key: {} (expected one of: {})",
                    key,
                    KEYS.join(", ")
                ))
            }
        }
        Ok(())
    }
}
