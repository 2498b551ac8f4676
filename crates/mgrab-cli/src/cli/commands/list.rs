//! `mgrab list` – print the captured resource snapshot.

use anyhow::Result;

use mgrab_core::capture::CaptureCoordinator;
use mgrab_core::command::{dispatch, Command, CommandResponse};
use mgrab_core::state_db::StateDb;

pub async fn run_list(coordinator: &mut CaptureCoordinator, db: &StateDb) -> Result<()> {
    let resources = match dispatch(coordinator, db, Command::GetResources).await {
        CommandResponse::Resources { resources } => resources,
        other => anyhow::bail!("unexpected response: {:?}", other),
    };

    if resources.is_empty() {
        println!("No captured resources.");
        return Ok(());
    }

    println!("{:<8} {:<8} {:>10}  URL", "TYPE", "FORMAT", "SIZE");
    for r in &resources {
        let size = if r.size > 0 {
            format_size(r.size)
        } else {
            "-".to_string()
        };
        println!(
            "{:<8} {:<8} {:>10}  {}",
            r.category.as_str(),
            r.format,
            size,
            r.url
        );
    }
    println!("{} resources total.", resources.len());
    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
