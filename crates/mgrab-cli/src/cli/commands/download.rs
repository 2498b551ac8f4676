//! `mgrab download` – save captured resources into a timestamped folder.

use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;

use mgrab_core::capture::CaptureCoordinator;
use mgrab_core::config::MgrabConfig;
use mgrab_core::convert::TargetFormat;
use mgrab_core::filename::batch_folder_token;
use mgrab_core::harvest::{download_batch, HarvestItem, HarvestOptions};
use mgrab_core::probe::HttpProbe;
use mgrab_core::sink::FsSink;

pub async fn run_download(
    coordinator: &CaptureCoordinator,
    cfg: &MgrabConfig,
    urls: Vec<String>,
    all: bool,
    dir: Option<PathBuf>,
    convert: bool,
    to: Option<String>,
) -> Result<()> {
    let snapshot = coordinator.resources();
    let items: Vec<HarvestItem> = if all {
        snapshot.iter().map(HarvestItem::from_resource).collect()
    } else {
        urls.iter()
            .map(|url| {
                // Prefer the captured entry so a content-type-confirmed
                // format skips the metadata probe.
                snapshot
                    .iter()
                    .find(|r| r.url == *url)
                    .map(HarvestItem::from_resource)
                    .unwrap_or_else(|| HarvestItem {
                        url: url.clone(),
                        file_name: None,
                        known_format: None,
                    })
            })
            .collect()
    };

    if items.is_empty() {
        println!("Nothing to download (no URLs given; use --all for the full snapshot).");
        return Ok(());
    }

    let target = match to {
        Some(tag) => TargetFormat::parse(&tag)
            .ok_or_else(|| anyhow::anyhow!("unknown conversion target: {tag}"))?,
        None => cfg.convert.target,
    };
    let options = HarvestOptions {
        convert: convert || cfg.convert.enabled,
        target,
        jpeg_quality: cfg.convert.jpeg_quality,
    };

    let root = dir
        .or_else(|| cfg.download_dir.clone())
        .unwrap_or_else(|| PathBuf::from("mgrab"));
    let folder = batch_folder_token(Local::now());

    // The batch blocks on curl and disk; keep it off the runtime threads.
    let outcome = {
        let root = root.clone();
        let folder = folder.clone();
        tokio::task::spawn_blocking(move || {
            let sink = FsSink::new(root);
            download_batch(&sink, &HttpProbe, &items, &folder, &options)
        })
        .await?
    };

    println!(
        "Downloaded {} of {} resources to {}",
        outcome.succeeded,
        outcome.attempted,
        root.join(&folder).display()
    );
    Ok(())
}
