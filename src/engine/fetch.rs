//! Fetch boundary: values handed over by whatever loads cluster objects.
//!
//! Derivation never fetches anything itself. Callers pass a [`FetchResult`]
//! in, and ask [`TaskRef::request`] what they should fetch.

use super::types::StepDefinition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespaced `Task` or cluster-scoped `ClusterTask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskKind {
    #[default]
    Task,
    ClusterTask,
}

impl TaskKind {
    #[must_use]
    pub fn is_cluster_scoped(&self) -> bool {
        matches!(self, Self::ClusterTask)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => write!(f, "Task"),
            Self::ClusterTask => write!(f, "ClusterTask"),
        }
    }
}

/// Result of fetching one object: `loaded == false` means "not there yet".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult<T> {
    pub data: Option<T>,
    pub loaded: bool,
}

impl<T> FetchResult<T> {
    #[must_use]
    pub fn loaded(data: T) -> Self {
        Self {
            data: Some(data),
            loaded: true,
        }
    }

    #[must_use]
    pub fn pending() -> Self {
        Self {
            data: None,
            loaded: false,
        }
    }

    /// The fetched object, only once loading finished.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        if self.loaded {
            self.data.as_ref()
        } else {
            None
        }
    }
}

impl<T> Default for FetchResult<T> {
    fn default() -> Self {
        Self::pending()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

/// A `Task` or `ClusterTask` object as returned by the cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTask {
    #[serde(default)]
    pub kind: TaskKind,
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: TaskSpec,
}

impl RawTask {
    #[must_use]
    pub fn new(kind: TaskKind, name: &str, steps: &[&str]) -> Self {
        Self {
            kind,
            metadata: ObjectMeta {
                name: name.to_string(),
                namespace: None,
            },
            spec: TaskSpec {
                steps: steps.iter().map(|s| StepDefinition::new(s)).collect(),
            },
        }
    }
}

/// Step definitions of a fetched task; empty until the fetch has loaded.
#[must_use]
pub fn step_definitions(fetched: &FetchResult<RawTask>) -> &[StepDefinition] {
    match fetched.get() {
        Some(task) => &task.spec.steps,
        None => &[],
    }
}

/// Reference from a pipeline task to the task definition it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub name: String,
    #[serde(default)]
    pub kind: TaskKind,
}

impl TaskRef {
    /// What to fetch for this reference. Cluster tasks carry no namespace.
    #[must_use]
    pub fn request(&self, namespace: &str) -> ResourceRequest {
        let namespace = match self.kind {
            TaskKind::Task => Some(namespace.to_string()),
            TaskKind::ClusterTask => None,
        };
        ResourceRequest {
            kind: self.kind,
            name: self.name.clone(),
            namespace,
        }
    }
}

/// A single object the fetch collaborator should load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRequest {
    pub kind: TaskKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_fetch_has_no_steps() {
        let pending: FetchResult<RawTask> = FetchResult::pending();
        assert!(step_definitions(&pending).is_empty());

        let stale = FetchResult {
            data: Some(RawTask::new(TaskKind::Task, "build", &["a"])),
            loaded: false,
        };
        assert!(step_definitions(&stale).is_empty());
    }

    #[test]
    fn test_loaded_fetch_steps() {
        let fetched = FetchResult::loaded(RawTask::new(TaskKind::Task, "build", &["a", "b"]));
        let names: Vec<_> = step_definitions(&fetched).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_request_scoping() {
        let task = TaskRef {
            name: "build".to_string(),
            kind: TaskKind::Task,
        };
        assert_eq!(task.request("dev").namespace.as_deref(), Some("dev"));

        let cluster = TaskRef {
            name: "git-clone".to_string(),
            kind: TaskKind::ClusterTask,
        };
        let req = cluster.request("dev");
        assert_eq!(req.namespace, None);
        assert_eq!(req.kind, TaskKind::ClusterTask);
    }

    #[test]
    fn test_raw_task_kind_defaults() {
        let raw = r#"{ "metadata": { "name": "lint" }, "spec": { "steps": [ { "name": "run", "image": "x" } ] } }"#;
        let task: RawTask = serde_json::from_str(raw).unwrap();
        assert_eq!(task.kind, TaskKind::Task);
        assert_eq!(task.spec.steps, vec![StepDefinition::new("run")]);
    }
}
