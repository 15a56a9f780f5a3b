//! Core types for pipeline visualization.
//!
//! Everything here is a transient view-model value: produced from fetched
//! cluster objects, read by the derivation functions, never persisted.

use super::error::VisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status taxonomy shared by pipeline runs, tasks and steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RunStatus {
    Idle,
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl RunStatus {
    pub const ALL: [RunStatus; 6] = [
        Self::Idle,
        Self::Pending,
        Self::Running,
        Self::Succeeded,
        Self::Failed,
        Self::Cancelled,
    ];

    /// Returns true once the run can no longer change.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }

    /// Returns the display color hint for UI rendering.
    #[must_use]
    pub fn color_hint(&self) -> &'static str {
        match self {
            Self::Succeeded => "green",
            Self::Failed => "red",
            Self::Running => "blue",
            Self::Pending => "amber",
            Self::Cancelled | Self::Idle => "gray",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Pending => write!(f, "Pending"),
            Self::Running => write!(f, "Running"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for RunStatus {
    type Err = VisError;

    /// Parses a status name, including the aliases the platform reports.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" => Ok(Self::Idle),
            "pending" | "starting" | "pipelinenotstarted" => Ok(Self::Pending),
            "running" | "in progress" => Ok(Self::Running),
            "succeeded" | "completed" => Ok(Self::Succeeded),
            "failed" => Ok(Self::Failed),
            "cancelled" | "pipelineruncancelled" | "taskruncancelled" => Ok(Self::Cancelled),
            _ => Err(VisError::UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for RunStatus {
    type Error = VisError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One entry of a task's `spec.steps`. Steps carry no status of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub name: String,
}

impl StepDefinition {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Recorded status of a task run, as delivered by the resource layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub reason: RunStatus,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<String>,
    /// Explicit step-level records, when the platform reported them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepRecord>,
}

impl TaskStatus {
    #[must_use]
    pub fn new(reason: RunStatus) -> Self {
        Self {
            reason,
            duration: String::new(),
            start_time: None,
            completion_time: None,
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_steps(mut self, steps: Vec<StepRecord>) -> Self {
        self.steps = steps;
        self
    }

    /// Finds the explicit record for a step, if one was reported.
    #[must_use]
    pub fn record_for(&self, step_name: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|r| r.name == step_name)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::new(RunStatus::Idle)
    }
}

/// Step-level state reported by the platform for a single step container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminated: Option<Terminated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<Running>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting: Option<Waiting>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terminated {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub exit_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

impl Terminated {
    /// Returns true for a clean exit.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.reason == "Completed" && self.exit_code == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Running {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waiting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Derived status of one step, recomputed on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepStatus {
    pub name: String,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        for status in RunStatus::ALL {
            assert_eq!(status.to_string().parse::<RunStatus>().ok(), Some(status));
        }
        let aliases = [
            ("In Progress", RunStatus::Running),
            ("starting", RunStatus::Pending),
            ("PipelineNotStarted", RunStatus::Pending),
            ("PipelineRunCancelled", RunStatus::Cancelled),
            ("TaskRunCancelled", RunStatus::Cancelled),
            ("Completed", RunStatus::Succeeded),
        ];
        for (alias, expected) in aliases {
            assert_eq!(alias.parse::<RunStatus>().ok(), Some(expected), "alias {alias}");
        }
        assert!(matches!(
            "Exploded".parse::<RunStatus>(),
            Err(VisError::UnknownStatus(s)) if s == "Exploded"
        ));
    }

    #[test]
    fn test_task_status_from_json() {
        let raw = r#"{
            "reason": "Running",
            "startTime": "2024-01-01T00:00:00Z",
            "steps": [
                { "name": "fetch", "terminated": { "reason": "Completed", "exitCode": 0 } },
                { "name": "build", "running": {} }
            ]
        }"#;
        let status: TaskStatus = serde_json::from_str(raw).unwrap();
        assert_eq!(status.reason, RunStatus::Running);
        assert_eq!(status.duration, "");
        assert!(status.record_for("fetch").unwrap().terminated.as_ref().unwrap().completed());
        assert!(status.record_for("build").unwrap().running.is_some());
        assert!(status.record_for("push").is_none());
    }

    #[test]
    fn test_unknown_reason_rejected() {
        let raw = r#"{ "reason": "Sideways" }"#;
        assert!(serde_json::from_str::<TaskStatus>(raw).is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(RunStatus::Succeeded.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(!RunStatus::Idle.is_terminal());
    }
}
