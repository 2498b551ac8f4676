//! Tracing setup for the short-lived CLI process.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,mgrab=debug"))
}

fn open_log_file() -> Option<File> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mgrab").ok()?;
    let log_dir = xdg_dirs.get_state_home().join("mgrab");
    std::fs::create_dir_all(&log_dir).ok()?;
    let path: PathBuf = log_dir.join("mgrab.log");
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Route tracing output to `~/.local/state/mgrab/mgrab.log`, appending
/// across runs so one log covers a whole capture session. Falls back to
/// stderr when the state directory is unusable.
pub fn init() {
    match open_log_file() {
        Some(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(default_filter())
                .with_ansi(false)
                .with_writer(move || -> Box<dyn Write + Send> {
                    match file.try_clone() {
                        Ok(clone) => Box::new(clone),
                        Err(_) => Box::new(io::stderr()),
                    }
                })
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(default_filter())
                .with_ansi(false)
                .with_writer(io::stderr)
                .init();
            tracing::warn!("log file unavailable, logging to stderr");
        }
    }
}
