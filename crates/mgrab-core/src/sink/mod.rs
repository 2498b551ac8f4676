//! Download sink: accepts a URL or byte payload plus a destination.
//!
//! The core only depends on the `DownloadSink` trait; `FsSink` is the
//! filesystem implementation used by the CLI. Downloads are grouped under a
//! per-batch folder and name conflicts are resolved by uniquifying
//! (`pic.png` -> `pic (1).png`), never by overwriting.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::fetch_bytes;

/// Either the original network resource or a self-contained payload
/// produced by conversion (no dependency on the URL staying reachable).
#[derive(Debug)]
pub enum DownloadSource {
    Url(String),
    Bytes(Vec<u8>),
}

/// One handoff to the sink. Conflict policy is always uniquify.
#[derive(Debug)]
pub struct DownloadRequest {
    pub source: DownloadSource,
    pub file_name: String,
    /// Batch folder (timestamp token) under the sink root.
    pub folder: String,
}

/// Opaque handle to a dispatched download.
#[derive(Debug)]
pub struct DownloadHandle {
    pub path: PathBuf,
}

/// Capability that accepts a download and reports completion or failure.
pub trait DownloadSink {
    fn begin(&self, request: DownloadRequest) -> Result<DownloadHandle>;
}

/// Writes downloads under a root directory.
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DownloadSink for FsSink {
    fn begin(&self, request: DownloadRequest) -> Result<DownloadHandle> {
        let dir = self.root.join(&request.folder);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

        let path = uniquify(&dir.join(&request.file_name));
        let bytes = match request.source {
            DownloadSource::Bytes(bytes) => bytes,
            DownloadSource::Url(url) => fetch_bytes(&url)?,
        };
        fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("saved {}", path.display());
        Ok(DownloadHandle { path })
    }
}

/// First non-existing variant of `path`: `name.ext`, `name (1).ext`, ...
fn uniquify(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|s| s.to_string_lossy().into_owned());
    let dir = path.parent().unwrap_or_else(|| Path::new(""));

    for n in 1.. {
        let name = match &ext {
            Some(ext) => format!("{} ({}).{}", stem, n, ext),
            None => format!("{} ({})", stem, n),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!()
}
