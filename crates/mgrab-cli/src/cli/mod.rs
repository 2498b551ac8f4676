//! CLI for the mgrab media capture tool.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mgrab_core::capture::CaptureCoordinator;
use mgrab_core::config;
use mgrab_core::state_db::StateDb;

use commands::{
    run_clear, run_download, run_list, run_panel_mode, run_set_filters, run_start, run_status,
    run_stop, run_watch,
};

/// Top-level CLI for the mgrab media capture tool.
#[derive(Debug, Parser)]
#[command(name = "mgrab")]
#[command(about = "mgrab: capture and download media resources observed on a page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Start a capture session (clears previously captured resources).
    Start {
        /// Browsing context (tab) id to scope capture to. Omit to accept
        /// observations from any context.
        #[arg(long)]
        tab: Option<i64>,

        /// Categories to capture: image, video, audio, media.
        #[arg(long, value_delimiter = ',', value_name = "CATEGORY")]
        types: Vec<String>,

        /// Accepted image formats (e.g. jpg,png,webp).
        #[arg(long, value_delimiter = ',', value_name = "FMT")]
        image_formats: Vec<String>,

        /// Accepted video formats (e.g. mp4,m3u8).
        #[arg(long, value_delimiter = ',', value_name = "FMT")]
        video_formats: Vec<String>,

        /// Accepted audio formats (e.g. mp3,flac).
        #[arg(long, value_delimiter = ',', value_name = "FMT")]
        audio_formats: Vec<String>,
    },

    /// Stop the capture session. Captured data is kept.
    Stop,

    /// Show session status and capture count.
    Status,

    /// List captured resources in capture order.
    List,

    /// Drop all captured resources.
    Clear,

    /// Replace the session's filter set (applies to future observations only).
    SetFilters {
        /// Categories to capture: image, video, audio, media.
        #[arg(long, value_delimiter = ',', value_name = "CATEGORY")]
        types: Vec<String>,

        #[arg(long, value_delimiter = ',', value_name = "FMT")]
        image_formats: Vec<String>,

        #[arg(long, value_delimiter = ',', value_name = "FMT")]
        video_formats: Vec<String>,

        #[arg(long, value_delimiter = ',', value_name = "FMT")]
        audio_formats: Vec<String>,
    },

    /// Show or set the panel mode preference ("side" or "popup").
    PanelMode {
        /// New mode; omit to print the current preference.
        mode: Option<String>,
    },

    /// Feed an exported webRequest event log (one JSON event per line;
    /// "-" reads stdin) through the capture pipeline.
    Watch {
        /// Path to the NDJSON event log.
        path: String,
    },

    /// Download captured resources into a timestamped batch folder.
    Download {
        /// URLs to download. With --all, every captured resource.
        urls: Vec<String>,

        /// Download the full captured snapshot.
        #[arg(long)]
        all: bool,

        /// Destination root (defaults to config download_dir, then ./mgrab).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Re-encode exotic image formats before saving.
        #[arg(long)]
        convert: bool,

        /// Conversion target: png, jpg, or webp.
        #[arg(long, value_name = "FMT")]
        to: Option<String>,
    },
}

impl CliCommand {
    /// Parse argv and run the selected command against the shared state DB.
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;

        let db = StateDb::open_default().await?;
        let mut coordinator = CaptureCoordinator::new(db.clone());
        coordinator.restore().await;

        match cli.command {
            CliCommand::Start {
                tab,
                types,
                image_formats,
                video_formats,
                audio_formats,
            } => {
                run_start(
                    &mut coordinator,
                    &db,
                    &cfg,
                    tab,
                    types,
                    image_formats,
                    video_formats,
                    audio_formats,
                )
                .await
            }
            CliCommand::Stop => run_stop(&mut coordinator, &db).await,
            CliCommand::Status => run_status(&mut coordinator, &db).await,
            CliCommand::List => run_list(&mut coordinator, &db).await,
            CliCommand::Clear => run_clear(&mut coordinator, &db).await,
            CliCommand::SetFilters {
                types,
                image_formats,
                video_formats,
                audio_formats,
            } => {
                run_set_filters(
                    &mut coordinator,
                    &db,
                    types,
                    image_formats,
                    video_formats,
                    audio_formats,
                )
                .await
            }
            CliCommand::PanelMode { mode } => run_panel_mode(&mut coordinator, &db, mode).await,
            CliCommand::Watch { path } => run_watch(&mut coordinator, &path).await,
            CliCommand::Download {
                urls,
                all,
                dir,
                convert,
                to,
            } => run_download(&coordinator, &cfg, urls, all, dir, convert, to).await,
        }
    }
}

#[cfg(test)]
mod tests;
