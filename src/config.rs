use crate::constants::{DEFAULT_ERROR_DIR, DEFAULT_SUCCESS_DIR};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Named constants (institute names, account identifiers, phrases) consumed
/// by the rules that need private knowledge.
pub trait Lookup: Send + Sync {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl Lookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }
}

/// Application configuration loaded from settings.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Private values looked up by the rules
    #[serde(default)]
    pub lookup: HashMap<String, String>,
    #[serde(default)]
    pub renamer: RenamerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamerConfig {
    /// Renamed files move here when this directory exists next to them
    #[serde(default = "default_success_dir")]
    pub success_dir: String,
    /// Files without a new name move here when this directory exists next to them
    #[serde(default = "default_error_dir")]
    pub error_dir: String,
    #[serde(default)]
    pub dry_run_default: bool,
}

fn default_success_dir() -> String {
    DEFAULT_SUCCESS_DIR.to_string()
}

fn default_error_dir() -> String {
    DEFAULT_ERROR_DIR.to_string()
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            success_dir: default_success_dir(),
            error_dir: default_error_dir(),
            dry_run_default: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// First existing config file among the default locations
    pub fn locate() -> Option<PathBuf> {
        let default_paths = [
            "config/settings.toml",
            "./config/settings.toml",
            "~/.config/guessfs/settings.toml",
        ];

        default_paths
            .iter()
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
            .find(|p| p.exists())
    }

    /// Load configuration from the default location, if there is one
    pub fn load() -> Result<Option<Self>> {
        match Self::locate() {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                Self::from_file(path).map(Some)
            }
            None => Ok(None),
        }
    }
}

impl Lookup for Config {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.lookup.lookup(key)
    }
}
