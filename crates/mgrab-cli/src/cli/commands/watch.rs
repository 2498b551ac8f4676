//! `mgrab watch` – feed an exported webRequest event log into the pipeline.
//!
//! The log is NDJSON: one raw event per line, as exported by the browser
//! companion from its two observation channels. Malformed lines are skipped
//! with a warning; the feed never aborts on one bad record.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use mgrab_core::capture::{CaptureCoordinator, Observed, RawEvent};

pub async fn run_watch(coordinator: &mut CaptureCoordinator, path: &str) -> Result<()> {
    let reader: Box<dyn BufRead> = if path == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open event log {path}"))?,
        ))
    };

    let mut fed = 0usize;
    let mut accepted = 0usize;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<RawEvent>(&line) {
            Ok(raw) => {
                fed += 1;
                if coordinator.observe(raw.normalize()).await == Observed::Accepted {
                    accepted += 1;
                }
            }
            Err(err) => {
                tracing::warn!("skipping malformed event: {}", err);
            }
        }
    }

    println!(
        "Processed {} events, captured {} new resources ({} total).",
        fed,
        accepted,
        coordinator.status().count
    );
    Ok(())
}
