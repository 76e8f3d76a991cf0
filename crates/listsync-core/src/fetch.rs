//! Single-URL HTTP retrieval.
//!
//! Uses the curl crate (libcurl) for one blocking GET per list source,
//! following redirects and collecting the body in memory. Failures come back
//! as a typed [`FetchError`] so the aggregator can log and move on.

use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::SyncConfig;

/// Per-fetch transport settings, derived from [`SyncConfig`].
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Cap on the whole transfer. `None` waits as long as the server keeps
    /// sending.
    pub timeout: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: None,
        }
    }
}

impl FetchOptions {
    pub fn from_config(cfg: &SyncConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: cfg.fetch_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Why a single fetch contributed nothing to the aggregate.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} returned HTTP {code}")]
    HttpStatus { url: String, code: u32 },
    #[error("error downloading {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
}

fn transport(url: &Url, source: curl::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        source,
    }
}

/// Fetches `url` and returns the response body as text.
///
/// Follows redirects. A non-2xx status or a transport-level failure is an
/// error; the caller decides whether it aborts anything. Bodies are decoded
/// as UTF-8, replacing invalid sequences.
pub fn fetch_text(url: &Url, opts: &FetchOptions) -> Result<String, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str()).map_err(|e| transport(url, e))?;
    easy.follow_location(true).map_err(|e| transport(url, e))?;
    easy.connect_timeout(opts.connect_timeout)
        .map_err(|e| transport(url, e))?;
    if let Some(timeout) = opts.timeout {
        easy.timeout(timeout).map_err(|e| transport(url, e))?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(|e| transport(url, e))?;
        transfer.perform().map_err(|e| transport(url, e))?;
    }

    let code = easy.response_code().map_err(|e| transport(url, e))?;
    if !(200..300).contains(&code) {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            code,
        });
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}
