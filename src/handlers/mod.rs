pub mod menu;
pub mod resolve;
pub mod show;
pub mod steps;

use colored::{ColoredString, Colorize};
use pipeline_vis::engine::types::{RunStatus, StepStatus};

pub(crate) fn status_icon(status: RunStatus) -> ColoredString {
    match status {
        RunStatus::Succeeded => "✓".green(),
        RunStatus::Failed => "✗".red(),
        RunStatus::Running => "▶".blue(),
        RunStatus::Pending => "…".yellow(),
        RunStatus::Cancelled => "⊘".dimmed(),
        RunStatus::Idle => "○".dimmed(),
    }
}

pub(crate) fn print_step_list(steps: &[StepStatus], indent: &str) {
    if steps.is_empty() {
        println!("{indent}(no steps)");
        return;
    }
    for (i, step) in steps.iter().enumerate() {
        let duration = step.duration.as_deref().map(|d| format!(" {d}")).unwrap_or_default();
        println!(
            "{indent}{} {}. {} ({}){}",
            status_icon(step.status),
            i + 1,
            step.name,
            step.status.to_string().dimmed(),
            duration.dimmed()
        );
    }
}
