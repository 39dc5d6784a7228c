//! Server configuration.
//!
//! Resolved from defaults, then `<config_dir>/doctor-review/config.json`, then
//! environment variables and command-line flags (both handled by clap in
//! `main.rs` and passed in as [`ConfigOverrides`]).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::models::Doctor;
use crate::seed;

const APP_NAME: &str = "doctor-review";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_REVIEWER: &str = "Albert Yao";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Address to bind the HTTP server to.
    pub address: String,
    pub port: u16,
    /// Name recorded on every audit entry.
    pub reviewer: String,
    /// JSON seed file. The built-in demo rows are used when unset.
    pub seed_path: Option<PathBuf>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            reviewer: DEFAULT_REVIEWER.to_string(),
            seed_path: None,
        }
    }
}

/// Values supplied on the command line or via environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub address: Option<String>,
    pub port: Option<u16>,
    pub reviewer: Option<String>,
    pub seed_path: Option<PathBuf>,
}

impl ReviewConfig {
    /// Base layer for [`with_overrides`](Self::with_overrides): the built-in
    /// defaults, replaced field by field by `config.json` when present.
    /// An unreadable file is logged and skipped.
    pub fn load() -> Self {
        match get_config_path().and_then(|path| Self::from_path(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file: {:#}", e);
                Self::default()
            }
        }
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(address) = overrides.address {
            self.address = address;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(reviewer) = overrides.reviewer {
            self.reviewer = reviewer;
        }
        if overrides.seed_path.is_some() {
            self.seed_path = overrides.seed_path;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }

    /// Rows to start the session with.
    pub fn load_doctors(&self) -> Result<Vec<Doctor>> {
        match &self.seed_path {
            Some(path) => seed::load_doctors(path),
            None => Ok(seed::default_doctors()),
        }
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
