//! Handler for the `show` command.

use anyhow::{Context, Result};
use colored::Colorize;
use pipeline_vis::engine::snapshot::{load_json, PipelineRunSnapshot, TaskCatalog};
use pipeline_vis::engine::view::{TaskNodeInput, TaskNodeView, VisConfig};
use serde::Serialize;
use std::path::Path;

/// Builds and prints the task nodes of a pipeline or pipeline run.
///
/// # Errors
/// Returns error if the snapshot or the task directory cannot be loaded.
pub fn handle(
    run_path: &Path,
    tasks_dir: &Path,
    namespace: Option<&str>,
    config: &VisConfig,
    json: bool,
) -> Result<()> {
    let snapshot: PipelineRunSnapshot = load_json(run_path).context("Failed to load pipeline run snapshot")?;
    let catalog = TaskCatalog::load_dir(tasks_dir).context("Failed to load task definitions")?;

    let namespace = namespace
        .or(snapshot.metadata.namespace.as_deref())
        .unwrap_or("default");
    let run_name = snapshot.is_run().then_some(snapshot.metadata.name.as_str());

    let nodes: Vec<TaskNodeView> = snapshot
        .tasks
        .iter()
        .map(|task| {
            let input = TaskNodeInput {
                pipeline_run_name: run_name,
                pipeline_run_status: snapshot.status,
                namespace,
                task,
            };
            TaskNodeView::build(&input, &catalog.fetch(&task.task_ref, namespace), config)
        })
        .collect();

    if json {
        return print_json(&snapshot, namespace, &nodes);
    }

    print_human(&snapshot, namespace, &nodes);
    Ok(())
}

#[derive(Serialize)]
struct ShowReport<'a> {
    name: &'a str,
    namespace: &'a str,
    status: Option<String>,
    tasks: &'a [TaskNodeView],
}

fn print_json(snapshot: &PipelineRunSnapshot, namespace: &str, nodes: &[TaskNodeView]) -> Result<()> {
    let report = ShowReport {
        name: &snapshot.metadata.name,
        namespace,
        status: snapshot.status.map(|s| s.to_string()),
        tasks: nodes,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_human(snapshot: &PipelineRunSnapshot, namespace: &str, nodes: &[TaskNodeView]) {
    match snapshot.status {
        Some(status) => println!(
            "{} PipelineRun [{}] in {} ({})",
            super::status_icon(status),
            snapshot.metadata.name.cyan().bold(),
            namespace,
            status.to_string().dimmed()
        ),
        None => println!(
            "{} Pipeline [{}] in {}",
            "📋".cyan(),
            snapshot.metadata.name.cyan().bold(),
            namespace
        ),
    }

    if nodes.is_empty() {
        println!("   (No tasks defined)");
        return;
    }

    for node in nodes {
        println!();
        if node.show_status {
            println!(
                "   {} {} ({}, {}/{} steps)",
                super::status_icon(node.status.reason),
                node.visual_name.yellow(),
                node.status.reason.to_string().dimmed(),
                node.step_counts.finished(),
                node.step_counts.total()
            );
        } else {
            println!("   {}", node.visual_name.yellow());
        }
        if let Some(link) = &node.link {
            println!("     link: {}", link.dimmed());
        }
        if let Some(tooltip) = &node.tooltip {
            super::print_step_list(&tooltip.steps, "       ");
        }
    }
}
