//! Handler for the `steps` command.

use anyhow::{Context, Result};
use colored::Colorize;
use pipeline_vis::engine::fetch::RawTask;
use pipeline_vis::engine::snapshot::load_json;
use pipeline_vis::engine::steps::{aggregate, summarize, StepCounts};
use pipeline_vis::engine::types::{StepStatus, TaskStatus};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StepsReport<'a> {
    task: &'a str,
    reason: String,
    steps: Vec<StepStatus>,
    counts: StepCounts,
}

/// Derives and prints per-step statuses for one task.
///
/// # Errors
/// Returns error if either JSON document cannot be loaded.
pub fn handle(task_path: &Path, status_path: Option<&Path>, json: bool) -> Result<()> {
    let task: RawTask = load_json(task_path).context("Failed to load task definition")?;
    let status: TaskStatus = status_path
        .map(load_json)
        .transpose()
        .context("Failed to load task status")?
        .unwrap_or_default();

    let steps = aggregate(&task.spec.steps, &status);
    let counts = summarize(&steps);

    if json {
        let report = StepsReport {
            task: &task.metadata.name,
            reason: status.reason.to_string(),
            steps,
            counts,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} [{}] {} ({}/{} steps finished)",
        super::status_icon(status.reason),
        task.kind.to_string().dimmed(),
        task.metadata.name.cyan().bold(),
        counts.finished(),
        counts.total()
    );
    super::print_step_list(&steps, "   ");
    Ok(())
}
