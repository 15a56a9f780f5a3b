//! Navigation targets for task nodes.

use super::fetch::{FetchResult, RawTask, TaskKind};

pub const API_GROUP: &str = "tekton.dev";
pub const API_VERSION: &str = "v1beta1";

/// Resource kinds a task node can link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    PipelineRun,
    Task,
    ClusterTask,
}

impl ResourceKind {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PipelineRun => "PipelineRun",
            Self::Task => "Task",
            Self::ClusterTask => "ClusterTask",
        }
    }

    /// `group~version~Kind` reference used in console paths.
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{API_GROUP}~{API_VERSION}~{}", self.kind())
    }
}

impl From<TaskKind> for ResourceKind {
    fn from(kind: TaskKind) -> Self {
        match kind {
            TaskKind::Task => Self::Task,
            TaskKind::ClusterTask => Self::ClusterTask,
        }
    }
}

/// Builds the console path of a resource.
///
/// Without a namespace the cluster-scoped form is produced.
#[must_use]
pub fn resource_path(kind: ResourceKind, name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => format!("/k8s/ns/{ns}/{}/{name}", kind.reference()),
        None => format!("/k8s/cluster/{}/{name}", kind.reference()),
    }
}

/// Where clicking a task node leads.
///
/// Inside a pipeline run this is the task's log view. On a static pipeline
/// it is the task definition, once it has been fetched.
#[must_use]
pub fn task_link(
    pipeline_run_name: Option<&str>,
    task_name: &str,
    namespace: &str,
    fetched: &FetchResult<RawTask>,
) -> Option<String> {
    if let Some(run) = pipeline_run_name {
        let base = resource_path(ResourceKind::PipelineRun, run, Some(namespace));
        return Some(format!("{base}/logs/{task_name}"));
    }

    let task = fetched.get()?;
    let name = task.metadata.name.as_str();
    Some(match task.kind {
        TaskKind::Task => resource_path(ResourceKind::Task, name, Some(namespace)),
        TaskKind::ClusterTask => resource_path(ResourceKind::ClusterTask, name, None),
    })
}
