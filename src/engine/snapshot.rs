//! Snapshot loading: typed views of JSON documents on disk.
//!
//! The CLI plays the fetch collaborator by reading snapshots instead of
//! talking to a cluster.

use super::error::{Result, VisError};
use super::fetch::{FetchResult, ObjectMeta, RawTask, TaskKind, TaskRef};
use super::types::RunStatus;
use super::view::PipelineTask;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A pipeline (no status) or pipeline run (with status) and its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRunSnapshot {
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RunStatus>,
    #[serde(default)]
    pub tasks: Vec<PipelineTask>,
}

impl PipelineRunSnapshot {
    /// A snapshot with a status is a live run; without one it is a spec.
    #[must_use]
    pub fn is_run(&self) -> bool {
        self.status.is_some()
    }
}

/// Reads and parses one JSON document.
///
/// # Errors
/// Returns `Io` if the file cannot be read, `Json` if it does not parse.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|source| VisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| VisError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Catalog of task definitions, keyed by kind and name.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: Vec<RawTask>,
}

impl TaskCatalog {
    #[must_use]
    pub fn new(tasks: Vec<RawTask>) -> Self {
        Self { tasks }
    }

    /// Reads all `*.json` files of `dir`, in file name order.
    ///
    /// # Errors
    /// Returns an error if the directory or any document cannot be read.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let io_err = |source: std::io::Error| VisError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|e| e == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut tasks = Vec::with_capacity(paths.len());
        for path in &paths {
            tasks.push(load_json::<RawTask>(path)?);
        }
        tracing::debug!(dir = %dir.display(), count = tasks.len(), "loaded task catalog");
        Ok(Self { tasks })
    }

    #[must_use]
    pub fn tasks(&self) -> &[RawTask] {
        &self.tasks
    }

    /// Tasks of one kind, in catalog order.
    #[must_use]
    pub fn of_kind(&self, kind: TaskKind) -> Vec<RawTask> {
        self.tasks.iter().filter(|t| t.kind == kind).cloned().collect()
    }

    /// Answers a fetch for `task_ref` made from `namespace`.
    ///
    /// A namespaced task document only matches its own namespace; documents
    /// without one match any. A missing definition stays unloaded.
    #[must_use]
    pub fn fetch(&self, task_ref: &TaskRef, namespace: &str) -> FetchResult<RawTask> {
        let request = task_ref.request(namespace);
        self.tasks
            .iter()
            .find(|t| {
                t.kind == request.kind
                    && t.metadata.name == request.name
                    && in_scope(t.metadata.namespace.as_deref(), request.namespace.as_deref())
            })
            .cloned()
            .map_or_else(
                || {
                    tracing::debug!(task = %task_ref.name, kind = %task_ref.kind, "task definition not found");
                    FetchResult::pending()
                },
                FetchResult::loaded,
            )
    }
}

fn in_scope(document: Option<&str>, requested: Option<&str>) -> bool {
    match (document, requested) {
        (Some(doc), Some(req)) => doc == req,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_matches_kind_and_name() {
        let catalog = TaskCatalog::new(vec![
            RawTask::new(TaskKind::Task, "build", &["a"]),
            RawTask::new(TaskKind::ClusterTask, "build", &["a", "b"]),
        ]);
        let cluster_ref = TaskRef {
            name: "build".to_string(),
            kind: TaskKind::ClusterTask,
        };
        let cluster = catalog.fetch(&cluster_ref, "dev");
        assert_eq!(cluster.get().map(|t| t.spec.steps.len()), Some(2));

        let missing_ref = TaskRef {
            name: "deploy".to_string(),
            kind: TaskKind::Task,
        };
        let missing = catalog.fetch(&missing_ref, "dev");
        assert!(!missing.loaded);
        assert_eq!(catalog.of_kind(TaskKind::Task).len(), 1);
    }

    #[test]
    fn test_fetch_respects_namespace() {
        let mut staging = RawTask::new(TaskKind::Task, "deploy", &["apply"]);
        staging.metadata.namespace = Some("staging".to_string());
        let shared = RawTask::new(TaskKind::Task, "lint", &["run"]);
        let catalog = TaskCatalog::new(vec![staging, shared]);

        let deploy = TaskRef {
            name: "deploy".to_string(),
            kind: TaskKind::Task,
        };
        assert!(catalog.fetch(&deploy, "staging").loaded);
        assert!(!catalog.fetch(&deploy, "prod").loaded);

        let lint = TaskRef {
            name: "lint".to_string(),
            kind: TaskKind::Task,
        };
        assert!(catalog.fetch(&lint, "prod").loaded);
    }

    #[test]
    fn test_snapshot_json() {
        let raw = r#"{
            "metadata": { "name": "release-1", "namespace": "ci" },
            "status": "Failed",
            "tasks": [
                { "name": "build-image", "taskRef": { "name": "buildah" }, "status": { "reason": "Running" } },
                { "name": "clone", "taskRef": { "name": "git-clone", "kind": "ClusterTask" } }
            ]
        }"#;
        let snap: PipelineRunSnapshot = serde_json::from_str(raw).unwrap();
        assert!(snap.is_run());
        assert_eq!(snap.tasks[0].task_ref.kind, TaskKind::Task);
        assert_eq!(snap.tasks[1].task_ref.kind, TaskKind::ClusterTask);
        assert!(snap.tasks[1].status.is_none());
    }
}
