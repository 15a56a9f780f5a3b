//! Handler for the `menu` command.

use anyhow::Result;
use colored::Colorize;
use pipeline_vis::engine::fetch::{RawTask, TaskKind};
use pipeline_vis::engine::menu::{MenuCallbacks, MenuEntry, RemoveTaskCallback, TaskListMenu};
use pipeline_vis::engine::snapshot::TaskCatalog;
use std::path::Path;

/// Lists the add-task menu and optionally selects an entry.
///
/// # Errors
/// Returns error if the task directory cannot be loaded or `pick` is out of range.
pub fn handle(tasks_dir: &Path, removable: bool, pick: Option<usize>, json: bool) -> Result<()> {
    let catalog = TaskCatalog::load_dir(tasks_dir)?;
    let namespace_tasks = catalog.of_kind(TaskKind::Task);
    let cluster_tasks = catalog.of_kind(TaskKind::ClusterTask);

    let on_remove_task: Option<RemoveTaskCallback> = if removable {
        Some(Box::new(|| println!("{} Removed task", "✗".red())))
    } else {
        None
    };
    let menu = TaskListMenu::new(
        &namespace_tasks,
        &cluster_tasks,
        MenuCallbacks {
            on_new_task: Box::new(|task: &RawTask| {
                println!("{} Added task [{}] ({})", "✓".green(), task.metadata.name.yellow(), task.kind);
            }),
            on_remove_task,
        },
    );

    if let Some(index) = pick {
        menu.select(index)?;
        return Ok(());
    }

    let entries = menu.entries();
    if json {
        let labels: Vec<_> = entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "label": e.label(),
                    "remove": matches!(e, MenuEntry::RemoveTask { .. }),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&labels)?);
        return Ok(());
    }

    let trigger = menu.trigger_label(None);
    if menu.is_disabled() {
        println!("[{}]", trigger.dimmed());
        return Ok(());
    }
    println!("[{} ▾]", trigger);
    for (i, entry) in entries.iter().enumerate() {
        match entry {
            MenuEntry::AddTask { label } => println!("   {i}. {label}"),
            MenuEntry::RemoveTask { label } => {
                println!("   {}", "──────".dimmed());
                println!("   {i}. {}", label.red());
            }
        }
    }
    Ok(())
}
