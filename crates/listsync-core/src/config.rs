use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::sync::Category;

/// Global configuration loaded from `~/.config/listsync/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Directory where aggregated list files are written (one file per category).
    pub lists_dir: PathBuf,
    /// Connection timeout per fetch, in seconds.
    pub connect_timeout_secs: u64,
    /// Optional cap on the whole transfer, in seconds. When unset, a slow
    /// source holds the batch until the server stops sending.
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,
    /// Newline-delimited allowlist source URLs.
    #[serde(default)]
    pub allowlist_urls: Option<String>,
    /// Newline-delimited blocklist source URLs.
    #[serde(default)]
    pub blocklist_urls: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lists_dir: PathBuf::from("lists"),
            connect_timeout_secs: 15,
            fetch_timeout_secs: None,
            allowlist_urls: None,
            blocklist_urls: None,
        }
    }
}

impl SyncConfig {
    /// Overrides the per-category source sets from the process environment.
    /// A variable that is set but blank still counts as "nothing configured"
    /// downstream (see [`SyncConfig::urls_for`]).
    pub fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var(Category::Allowlist.env_var()) {
            self.allowlist_urls = Some(raw);
        }
        if let Ok(raw) = std::env::var(Category::Blocklist.env_var()) {
            self.blocklist_urls = Some(raw);
        }
    }

    /// Raw source set for `category`, or `None` when absent or blank.
    pub fn urls_for(&self, category: Category) -> Option<&str> {
        let raw = match category {
            Category::Allowlist => self.allowlist_urls.as_deref(),
            Category::Blocklist => self.blocklist_urls.as_deref(),
        };
        raw.filter(|s| !s.trim().is_empty())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("listsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SyncConfig = toml::from_str(&data)?;
    Ok(cfg)
}
