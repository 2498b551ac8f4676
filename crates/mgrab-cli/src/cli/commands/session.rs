//! `mgrab start` / `mgrab stop` / `mgrab status` – session lifecycle.

use anyhow::Result;

use mgrab_core::capture::CaptureCoordinator;
use mgrab_core::command::{dispatch, Command, CommandResponse};
use mgrab_core::config::MgrabConfig;
use mgrab_core::state_db::StateDb;

use super::filter_config_from_args;

#[allow(clippy::too_many_arguments)]
pub async fn run_start(
    coordinator: &mut CaptureCoordinator,
    db: &StateDb,
    cfg: &MgrabConfig,
    tab: Option<i64>,
    types: Vec<String>,
    image_formats: Vec<String>,
    video_formats: Vec<String>,
    audio_formats: Vec<String>,
) -> Result<()> {
    // Explicit filter flags win; otherwise the config's default set applies.
    let filters = filter_config_from_args(types, image_formats, video_formats, audio_formats)?
        .or_else(|| Some(cfg.filters.clone()));

    let response = dispatch(
        coordinator,
        db,
        Command::StartSession {
            context: tab,
            filters,
        },
    )
    .await;
    expect_ok(response)?;
    match tab {
        Some(tab) => println!("Capture started for tab {tab}."),
        None => println!("Capture started (all contexts)."),
    }
    Ok(())
}

pub async fn run_stop(coordinator: &mut CaptureCoordinator, db: &StateDb) -> Result<()> {
    expect_ok(dispatch(coordinator, db, Command::StopSession).await)?;
    println!("Capture stopped. Captured data is kept.");
    Ok(())
}

pub async fn run_status(coordinator: &mut CaptureCoordinator, db: &StateDb) -> Result<()> {
    match dispatch(coordinator, db, Command::GetStatus).await {
        CommandResponse::Status(status) => {
            println!(
                "Session: {}",
                if status.active { "active" } else { "inactive" }
            );
            match status.context {
                Some(tab) => println!("Context: tab {tab}"),
                None => println!("Context: any"),
            }
            let types: Vec<_> = status
                .filters
                .resource_types
                .iter()
                .map(|c| c.as_str())
                .collect();
            println!("Categories: {}", types.join(", "));
            println!("Captured: {} resources", status.count);
            Ok(())
        }
        other => anyhow::bail!("unexpected response: {:?}", other),
    }
}

pub(super) fn expect_ok(response: CommandResponse) -> Result<()> {
    match response {
        CommandResponse::Ok => Ok(()),
        CommandResponse::Error { message } => anyhow::bail!("{}", message),
        other => anyhow::bail!("unexpected response: {:?}", other),
    }
}
