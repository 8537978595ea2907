//! Defaults for the `urlsave` CLI, loaded from `~/.config/urlsave/config.toml`.
//!
//! The download pipeline itself never reads this file; the CLI converts it
//! into [`Options`] and layers command-line flags on top.

use crate::options::{Options, DEFAULT_BASE_FOLDER};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlsaveConfig {
    /// Folder under which each download gets its own `<uuid>` directory.
    pub base_folder: PathBuf,
    /// Maximum body size in bytes (0 = unlimited).
    #[serde(default)]
    pub max_size: u64,
    /// Required exact MIME type, if any.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Accepted MIME groups (e.g. "image"); empty accepts everything.
    #[serde(default)]
    pub mime_groups: Vec<String>,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer deadline in seconds (None = no deadline).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Keep files that fail MIME validation instead of deleting them.
    #[serde(default)]
    pub keep_rejected: bool,
}

impl Default for UrlsaveConfig {
    fn default() -> Self {
        Self {
            base_folder: PathBuf::from(DEFAULT_BASE_FOLDER),
            max_size: 0,
            mime_type: None,
            mime_groups: Vec::new(),
            connect_timeout_secs: Some(30),
            timeout_secs: None,
            keep_rejected: false,
        }
    }
}

impl UrlsaveConfig {
    pub fn to_options(&self) -> Options {
        Options {
            max_size: self.max_size,
            base_folder: self.base_folder.clone(),
            mime_type: self.mime_type.clone().unwrap_or_default(),
            mime_groups: self.mime_groups.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
            keep_rejected: self.keep_rejected,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlsave")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlsaveConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UrlsaveConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: UrlsaveConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
