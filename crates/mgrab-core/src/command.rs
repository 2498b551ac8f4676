//! Command surface consumed by UI hosts (panel, CLI).
//!
//! Request/response verbs over the coordinator and the panel-mode
//! preference. Failures come back as an explicit `Error` response, never as
//! a propagated error: command-level failure is part of the protocol.

use serde::{Deserialize, Serialize};

use crate::capture::{CaptureCoordinator, SessionStatus};
use crate::filter::FilterConfig;
use crate::registry::CapturedResource;
use crate::state_db::StateDb;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Command {
    StartSession {
        context: Option<i64>,
        filters: Option<FilterConfig>,
    },
    StopSession,
    Clear,
    UpdateFilters {
        filters: FilterConfig,
    },
    GetStatus,
    GetResources,
    SetPanelMode {
        side_panel: bool,
    },
    GetPanelMode,
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum CommandResponse {
    Ok,
    Status(SessionStatus),
    Resources { resources: Vec<CapturedResource> },
    PanelMode { side_panel: bool },
    Error { message: String },
}

/// Execute one command against the coordinator and state store.
pub async fn dispatch(
    coordinator: &mut CaptureCoordinator,
    db: &StateDb,
    command: Command,
) -> CommandResponse {
    match command {
        Command::StartSession { context, filters } => {
            coordinator.start(context, filters).await;
            CommandResponse::Ok
        }
        Command::StopSession => {
            coordinator.stop().await;
            CommandResponse::Ok
        }
        Command::Clear => {
            coordinator.clear().await;
            CommandResponse::Ok
        }
        Command::UpdateFilters { filters } => {
            coordinator.update_filters(filters).await;
            CommandResponse::Ok
        }
        Command::GetStatus => CommandResponse::Status(coordinator.status()),
        Command::GetResources => CommandResponse::Resources {
            resources: coordinator.resources(),
        },
        Command::SetPanelMode { side_panel } => match db.save_panel_mode(side_panel).await {
            Ok(()) => CommandResponse::Ok,
            Err(err) => CommandResponse::Error {
                message: format!("{:#}", err),
            },
        },
        Command::GetPanelMode => match db.load_panel_mode().await {
            Ok(side_panel) => CommandResponse::PanelMode { side_panel },
            Err(err) => CommandResponse::Error {
                message: format!("{:#}", err),
            },
        },
    }
}
