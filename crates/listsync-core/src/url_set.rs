//! Parsing of newline-delimited URL sets.
//!
//! List sources arrive as one string with a URL per line (`\n` or `\r\n`
//! endings, e.g. pasted from a CI secret). Blank lines are dropped silently;
//! lines that do not parse as URLs are dropped with a warning.

use url::Url;

/// Splits `raw` into an ordered list of well-formed URLs.
///
/// Order is preserved and duplicates are kept. Validation failures skip the
/// entry; they are never fatal.
pub fn parse_url_set(raw: &str) -> Vec<Url> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match Url::parse(line) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!("invalid URL skipped: {} ({})", line, err);
                None
            }
        })
        .collect()
}
