//! Domain-list parsing: hosts-file, adblock, and plain formats.
//!
//! Downloaded lists mix several conventions in one file. Three line shapes
//! carry a domain:
//!
//! - plain: `ads.example.com`
//! - hosts: `0.0.0.0 ads.example.com` (or `127.0.0.1 ...`)
//! - adblock: `||ads.example.com^`
//!
//! Everything else (comments, section headers, cosmetic rules) is dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Hosts-file entry routing a domain to a null or loopback address.
static HOSTS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0\.0\.0\.0|127\.0\.0\.1)\s+").expect("hosts line pattern"));

/// Domain shape check: first label starts alphanumeric, contains only
/// alphanumerics/hyphens, and is followed by a `.` label boundary. Later
/// labels are deliberately left unchecked.
static DOMAIN_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9]?\.").expect("domain shape pattern")
});

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with('!') || line.starts_with('[')
}

/// Extracts the domain token from one trimmed, non-comment line.
///
/// An adblock-style line without the `^` terminator falls through whole and
/// fails the shape check downstream.
fn extract_domain(line: &str) -> &str {
    if HOSTS_LINE.is_match(line) {
        line.split_whitespace().nth(1).unwrap_or("")
    } else if line.starts_with("||") {
        match line.find('^') {
            Some(end) => &line[2..end],
            None => line,
        }
    } else {
        line
    }
}

/// Parses raw list text into the set of distinct, lowercased domains.
pub fn domains_from_text(text: &str) -> HashSet<String> {
    let mut domains = HashSet::new();
    for line in text.split('\n') {
        let line = line.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }
        let domain = extract_domain(line);
        if DOMAIN_SHAPE.is_match(domain) {
            domains.insert(domain.to_lowercase());
        }
    }
    domains
}

/// Reads `path` and parses it into deduplicated, normalized domains.
///
/// Iteration order of the result is unspecified. An unreadable file logs the
/// error and yields an empty result; it is not fatal to the caller.
pub fn parse_domains(path: &Path) -> Vec<String> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::error!("error reading file {}: {}", path.display(), err);
            return Vec::new();
        }
    };
    domains_from_text(&text).into_iter().collect()
}
