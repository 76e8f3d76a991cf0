//! Orchestration: resolve a category's sources, fetch each, persist the
//! aggregate.
//!
//! Fetches are strictly sequential. Per-URL failures are logged and skipped;
//! only the final write to the destination file escalates to the caller.

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::config::SyncConfig;
use crate::fetch::{self, FetchOptions};
use crate::storage;
use crate::url_set;

/// List categories, each with its own source set and output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Allowlist,
    Blocklist,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Allowlist => "allowlist",
            Category::Blocklist => "blocklist",
        }
    }

    /// Environment variable holding this category's newline-delimited URLs.
    pub fn env_var(self) -> &'static str {
        match self {
            Category::Allowlist => "ALLOWLIST_URLS",
            Category::Blocklist => "BLOCKLIST_URLS",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Category::Allowlist => "allowlist.txt",
            Category::Blocklist => "blocklist.txt",
        }
    }

    /// Destination file for this category under the configured lists dir.
    pub fn output_path(self, cfg: &SyncConfig) -> PathBuf {
        cfg.lists_dir.join(self.file_name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No URLs were configured (or none survived parsing); nothing was
    /// written and any existing file is left untouched.
    NoSources,
    /// Aggregate written: how many sources contributed and how many bytes
    /// went to disk.
    Written { sources: usize, bytes: u64 },
}

/// Fetches every URL in `urls` sequentially and writes the newline-joined
/// bodies to `dest`.
///
/// A URL whose fetch fails (transport error or non-2xx status) contributes
/// nothing and does not abort the batch. If every fetch fails the empty
/// aggregate is still written. Only the destination write returns `Err`.
pub fn aggregate_to_file(urls: &[Url], dest: &Path, opts: &FetchOptions) -> Result<SyncOutcome> {
    if urls.is_empty() {
        tracing::warn!("no valid URLs to download");
        return Ok(SyncOutcome::NoSources);
    }

    tracing::info!("downloading from {} URL(s)", urls.len());
    let mut bodies: Vec<String> = Vec::new();
    for url in urls {
        tracing::info!("downloading: {}", url);
        match fetch::fetch_text(url, opts) {
            Ok(body) => {
                tracing::info!("downloaded {} ({} bytes)", url, body.len());
                bodies.push(body);
            }
            Err(err) => {
                tracing::error!("{}", err);
            }
        }
    }

    let sources = bodies.len();
    let combined = bodies.join("\n");
    let bytes = storage::write_atomic(dest, &combined)
        .with_context(|| format!("failed to write {}", dest.display()))?;
    tracing::info!("saved combined content to {} ({} bytes)", dest.display(), bytes);

    Ok(SyncOutcome::Written { sources, bytes })
}

/// Parses `raw` as a newline-delimited URL set, then aggregates to `dest`.
pub fn aggregate_raw_to_file(raw: &str, dest: &Path, opts: &FetchOptions) -> Result<SyncOutcome> {
    let urls = url_set::parse_url_set(raw);
    aggregate_to_file(&urls, dest, opts)
}

/// Syncs one category: resolves its configured source set, fetches each
/// source, and overwrites the category's output file.
pub fn run_category(cfg: &SyncConfig, category: Category) -> Result<SyncOutcome> {
    let Some(raw) = cfg.urls_for(category) else {
        tracing::info!(
            "no URLs configured for {} ({} is empty)",
            category,
            category.env_var()
        );
        return Ok(SyncOutcome::NoSources);
    };
    tracing::debug!("{} sources: {:?}", category, raw);

    let dest = category.output_path(cfg);
    let opts = FetchOptions::from_config(cfg);
    aggregate_raw_to_file(raw, &dest, &opts)
}
