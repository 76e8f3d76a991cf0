//! CLI for the listsync domain-list fetcher.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use listsync_core::config::{self, SyncConfig};
use listsync_core::sync::{self, Category, SyncOutcome};

/// Top-level CLI: one positional argument selecting the list category.
#[derive(Debug, Parser)]
#[command(name = "listsync")]
#[command(about = "listsync: fetch and aggregate domain allow/block lists", long_about = None)]
pub struct Cli {
    /// List category to download.
    #[arg(value_enum)]
    pub category: CategoryArg,
}

/// CLI-facing category names; anything outside this closed set is a usage
/// error with nonzero exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Allowlist,
    Blocklist,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Allowlist => Category::Allowlist,
            CategoryArg::Blocklist => Category::Blocklist,
        }
    }
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let category = Category::from(cli.category);

    // Build the configuration once up front: config file, then env overrides.
    let mut cfg = config::load_or_init()?;
    cfg.apply_env();
    tracing::debug!("loaded config: {:?}", cfg);

    println!("=== Downloading {} ===", category);
    match run_category(&cfg, category) {
        Ok(()) => Ok(()),
        Err(err) => {
            dump_env_debug(category.env_var());
            Err(err)
        }
    }
}

fn run_category(cfg: &SyncConfig, category: Category) -> Result<()> {
    match sync::run_category(cfg, category)? {
        SyncOutcome::NoSources => {
            println!(
                "No URLs configured for {} ({} is empty)",
                category,
                category.env_var()
            );
        }
        SyncOutcome::Written { sources, bytes } => {
            println!(
                "Successfully downloaded {}: {} source(s), {} bytes written to {}",
                category,
                sources,
                bytes,
                category.output_path(cfg).display()
            );
        }
    }
    Ok(())
}

/// On fatal errors, dump the raw category variable and its character codes.
/// CRLF and invisible characters smuggled in via CI secret stores are
/// otherwise invisible in logs.
fn dump_env_debug(var: &str) {
    if let Ok(raw) = std::env::var(var) {
        eprintln!("DEBUG - raw {}: {:?}", var, raw);
        let codes: Vec<String> = raw.chars().map(|c| format!("{}({})", c, c as u32)).collect();
        eprintln!("DEBUG - character codes: {}", codes.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CategoryArg {
        Cli::try_parse_from(args).unwrap().category
    }

    #[test]
    fn cli_parse_allowlist() {
        assert_eq!(parse(&["listsync", "allowlist"]), CategoryArg::Allowlist);
    }

    #[test]
    fn cli_parse_blocklist() {
        assert_eq!(parse(&["listsync", "blocklist"]), CategoryArg::Blocklist);
    }

    #[test]
    fn cli_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["listsync", "greylist"]).is_err());
    }

    #[test]
    fn cli_requires_a_category() {
        assert!(Cli::try_parse_from(["listsync"]).is_err());
    }

    #[test]
    fn category_arg_maps_to_core_category() {
        assert_eq!(Category::from(CategoryArg::Allowlist), Category::Allowlist);
        assert_eq!(Category::from(CategoryArg::Blocklist), Category::Blocklist);
    }
}
