//! In-memory content fetch for conversion and byte-payload downloads.
//!
//! Unlike a streaming download, conversion needs the whole resource in
//! memory to decode it, so the fetch is capped. The cap is generous for
//! images; anything larger is not something we re-encode anyway.

use anyhow::{Context, Result};
use std::time::Duration;

/// Upper bound on an in-memory fetch (64 MiB).
const MAX_FETCH_BYTES: usize = 64 * 1024 * 1024;

/// Fetch the full resource body into memory with a single GET.
///
/// Follows redirects; bounded by connect and total timeouts; fails on
/// non-2xx status or when the body exceeds the size cap. Runs in the
/// current thread; call from `spawn_blocking` if used from async code.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let mut body: Vec<u8> = Vec::new();
    let mut over_cap = false;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    easy.timeout(Duration::from_secs(120))?;

    let outcome = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if body.len() + data.len() > MAX_FETCH_BYTES {
                over_cap = true;
                return Ok(0); // abort transfer
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()
    };
    if over_cap {
        anyhow::bail!("resource exceeds {} byte fetch cap: {}", MAX_FETCH_BYTES, url);
    }
    outcome.context("GET request failed")?;

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    Ok(body)
}
