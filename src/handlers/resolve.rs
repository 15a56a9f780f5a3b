//! Handler for the `resolve` command.

use anyhow::{Context, Result};
use colored::Colorize;
use pipeline_vis::engine::snapshot::load_json;
use pipeline_vis::engine::state::resolve;
use pipeline_vis::engine::types::{RunStatus, TaskStatus};
use std::path::Path;

/// Prints the status a task shows inside its pipeline run.
///
/// # Errors
/// Returns error if the run status is unknown or the status file is unreadable.
pub fn handle(run_status: Option<&str>, task_status: Option<&Path>, json: bool) -> Result<()> {
    let run = run_status
        .map(str::parse::<RunStatus>)
        .transpose()
        .context("Invalid --run-status")?;

    let recorded: Option<TaskStatus> = task_status
        .map(load_json)
        .transpose()
        .context("Failed to load task status")?;

    let resolved = resolve(run, recorded.as_ref());

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    let recorded_reason = recorded.map(|r| r.reason);
    println!(
        "{} {} ({})",
        super::status_icon(resolved.reason),
        resolved.reason.to_string().bold(),
        resolved.reason.color_hint().dimmed()
    );
    match (recorded_reason, run) {
        (Some(own), Some(run)) if own != resolved.reason => {
            println!(
                "   {} task reported {own}, but its pipeline run is {run}",
                "reason:".yellow()
            );
        }
        (None, _) => println!("   {} task has no recorded status", "reason:".dimmed()),
        _ => {}
    }
    if !resolved.duration.is_empty() {
        println!("   Duration: {}", resolved.duration.dimmed());
    }
    Ok(())
}
