//! `mgrab panel-mode` – show or set the UI panel preference.

use anyhow::Result;

use mgrab_core::capture::CaptureCoordinator;
use mgrab_core::command::{dispatch, Command, CommandResponse};
use mgrab_core::state_db::StateDb;

pub async fn run_panel_mode(
    coordinator: &mut CaptureCoordinator,
    db: &StateDb,
    mode: Option<String>,
) -> Result<()> {
    if let Some(mode) = mode {
        let side_panel = match mode.as_str() {
            "side" => true,
            "popup" => false,
            other => anyhow::bail!("unknown panel mode: {other} (expected \"side\" or \"popup\")"),
        };
        match dispatch(coordinator, db, Command::SetPanelMode { side_panel }).await {
            CommandResponse::Ok => {
                println!("Panel mode set to {mode}.");
                Ok(())
            }
            CommandResponse::Error { message } => anyhow::bail!("{}", message),
            other => anyhow::bail!("unexpected response: {:?}", other),
        }
    } else {
        match dispatch(coordinator, db, Command::GetPanelMode).await {
            CommandResponse::PanelMode { side_panel } => {
                println!(
                    "Panel mode: {}",
                    if side_panel { "side" } else { "popup" }
                );
                Ok(())
            }
            CommandResponse::Error { message } => anyhow::bail!("{}", message),
            other => anyhow::bail!("unexpected response: {:?}", other),
        }
    }
}
