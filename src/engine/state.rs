//! Run Status Resolver: Computes the status a task should display.
//!
//! A task whose parent pipeline run failed or was cancelled before the task
//! finished never gets to report a terminal status of its own. This module
//! answers "what badge does this task show right now?" from the run status
//! and the task's recorded status.

use super::types::{RunStatus, TaskStatus};

/// Derives the effective status of a task within its pipeline run.
///
/// This is a pure function: the caller's `task_status` is never modified,
/// an override produces a fresh value.
///
/// # Arguments
/// * `pipeline_run_status` - Coarse status of the parent run, if any
/// * `task_status` - The task's own recorded status, if it has one
#[must_use]
pub fn resolve(pipeline_run_status: Option<RunStatus>, task_status: Option<&TaskStatus>) -> TaskStatus {
    let Some(recorded) = task_status else {
        return TaskStatus::default();
    };

    let mut effective = recorded.clone();
    if run_aborted(pipeline_run_status) && !finished(recorded.reason) {
        tracing::debug!(
            recorded = %recorded.reason,
            run = ?pipeline_run_status,
            "task cut short by its pipeline run, showing Cancelled"
        );
        effective.reason = RunStatus::Cancelled;
    }
    effective
}

/// Failed and cancelled runs abort every task that has not finished.
fn run_aborted(status: Option<RunStatus>) -> bool {
    matches!(status, Some(RunStatus::Failed | RunStatus::Cancelled))
}

/// Succeeded and Failed are the task's own outcome and are never overridden.
fn finished(reason: RunStatus) -> bool {
    matches!(reason, RunStatus::Succeeded | RunStatus::Failed)
}
