//! Header-only metadata probe.
//!
//! URL extensions can lie: a server may label an exotic-format payload with
//! a conventional extension. The probe issues a HEAD request via the curl
//! crate (libcurl) to discover the true Content-Type before the conversion
//! decision, plus Content-Length and Content-Disposition for naming.

mod parse;

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

/// Result of a HEAD request: the headers the conversion decision and
/// filename derivation care about.
#[derive(Debug, Clone, Default)]
pub struct ProbeResult {
    /// Lowercased `Content-Type` value, if present.
    pub content_type: Option<String>,
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// `Content-Disposition` value if present (filename hint).
    pub content_disposition: Option<String>,
}

/// Seam for the metadata probe so decision logic is testable without
/// network access.
pub trait MetadataProbe {
    fn probe(&self, url: &str) -> Result<ProbeResult>;
}

/// Probe over a real HEAD request. Follows redirects; bounded by connect
/// and total timeouts so a stalled server cannot block a download decision.
/// Runs in the current thread; call from `spawn_blocking` if used from
/// async code.
#[derive(Debug, Default)]
pub struct HttpProbe;

impl MetadataProbe for HttpProbe {
    fn probe(&self, url: &str) -> Result<ProbeResult> {
        let mut headers: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.nobody(true)?; // HEAD request
        easy.follow_location(true)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(30))?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform().context("HEAD request failed")?;
        }

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("HEAD {} returned HTTP {}", url, code);
        }

        Ok(parse::parse_headers(&headers))
    }
}
