//! Step Status Aggregator: Per-step statuses from a single task status.
//!
//! Steps of a task run strictly in declared order, but the platform does not
//! always report them individually. Explicit step records win; every step
//! without one is placed relative to the first unreported step (the
//! frontier) according to the task-level reason. A reported step that is
//! still active or has failed already owns the task's outcome, and then no
//! frontier exists.

use super::types::{RunStatus, StepDefinition, StepRecord, StepStatus, TaskStatus};
use chrono::DateTime;
use serde::Serialize;

/// Derives one status per step, in declared order.
///
/// Pure function of its inputs. An empty step list yields an empty result.
#[must_use]
pub fn aggregate(steps: &[StepDefinition], task_status: &TaskStatus) -> Vec<StepStatus> {
    let reported_active = steps
        .iter()
        .filter_map(|s| task_status.record_for(&s.name))
        .any(|r| from_record(r) != RunStatus::Succeeded);

    let frontier = if reported_active {
        None
    } else {
        steps
            .iter()
            .position(|s| task_status.record_for(&s.name).is_none())
    };

    steps
        .iter()
        .enumerate()
        .map(|(index, step)| step_status(step, index, frontier, task_status))
        .collect()
}

/// Derives the status of the step at `index`.
///
/// `frontier` is the index of the first step without an explicit record, or
/// `None` when a reported step is still active or failed.
#[must_use]
pub fn step_status(
    step: &StepDefinition,
    index: usize,
    frontier: Option<usize>,
    task_status: &TaskStatus,
) -> StepStatus {
    if let Some(record) = task_status.record_for(&step.name) {
        return StepStatus {
            name: step.name.clone(),
            status: from_record(record),
            duration: record_duration(record),
        };
    }

    let at_frontier = frontier == Some(index);
    let status = match task_status.reason {
        RunStatus::Succeeded => RunStatus::Succeeded,
        RunStatus::Pending => RunStatus::Pending,
        RunStatus::Idle => RunStatus::Idle,
        reason @ (RunStatus::Running | RunStatus::Failed | RunStatus::Cancelled) => {
            if at_frontier {
                reason
            } else {
                RunStatus::Idle
            }
        }
    };

    StepStatus {
        name: step.name.clone(),
        status,
        duration: None,
    }
}

fn from_record(record: &StepRecord) -> RunStatus {
    if let Some(terminated) = &record.terminated {
        if terminated.completed() {
            RunStatus::Succeeded
        } else {
            RunStatus::Failed
        }
    } else if record.running.is_some() {
        RunStatus::Running
    } else {
        // Waiting, or a record with no state yet.
        RunStatus::Pending
    }
}

fn record_duration(record: &StepRecord) -> Option<String> {
    let terminated = record.terminated.as_ref()?;
    let started = DateTime::parse_from_rfc3339(terminated.started_at.as_deref()?).ok()?;
    let finished = DateTime::parse_from_rfc3339(terminated.finished_at.as_deref()?).ok()?;
    let secs = (finished - started).num_seconds();
    if secs < 0 {
        tracing::debug!(step = %record.name, "step finished before it started, no duration");
        return None;
    }
    Some(format_duration(secs.unsigned_abs()))
}

/// Formats whole seconds as a compact duration, e.g. `1m 5s`.
#[must_use]
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Aggregate counts of steps by status, for the rolled-up task badge.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct StepCounts {
    pub idle: usize,
    pub pending: usize,
    pub running: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
}

impl StepCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.idle + self.pending + self.running + self.succeeded + self.failed + self.cancelled
    }

    /// Steps that reached a terminal status.
    #[must_use]
    pub fn finished(&self) -> usize {
        self.succeeded + self.failed + self.cancelled
    }
}

/// Counts the derived step statuses.
#[must_use]
pub fn summarize(steps: &[StepStatus]) -> StepCounts {
    let mut counts = StepCounts::default();
    for step in steps {
        match step.status {
            RunStatus::Idle => counts.idle += 1,
            RunStatus::Pending => counts.pending += 1,
            RunStatus::Running => counts.running += 1,
            RunStatus::Succeeded => counts.succeeded += 1,
            RunStatus::Failed => counts.failed += 1,
            RunStatus::Cancelled => counts.cancelled += 1,
        }
    }
    counts
}
