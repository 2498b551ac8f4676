//! `mgrab clear` – drop all captured resources.

use anyhow::Result;

use mgrab_core::capture::CaptureCoordinator;
use mgrab_core::command::{dispatch, Command};
use mgrab_core::state_db::StateDb;

use super::session::expect_ok;

pub async fn run_clear(coordinator: &mut CaptureCoordinator, db: &StateDb) -> Result<()> {
    expect_ok(dispatch(coordinator, db, Command::Clear).await)?;
    println!("Captured resources cleared.");
    Ok(())
}
