//! Task node view model: everything a renderer needs for one pipeline task.
//!
//! Designed to be rebuilt on every data refresh; holds no references into
//! the inputs.

use super::fetch::{step_definitions, FetchResult, RawTask, ResourceRequest, TaskRef};
use super::nav::task_link;
use super::state::resolve;
use super::steps::{aggregate, summarize, StepCounts};
use super::types::{RunStatus, StepStatus, TaskStatus};
use serde::{Deserialize, Serialize};

/// Rendering options, passed explicitly instead of read from global state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisConfig {
    /// Skip the step-list tooltip (and the task fetch that feeds it).
    pub disable_tooltip: bool,
}

/// A task as declared in a pipeline or pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTask {
    #[serde(default)]
    pub name: String,
    pub task_ref: TaskRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// Inputs for one task node.
#[derive(Debug, Clone)]
pub struct TaskNodeInput<'a> {
    pub pipeline_run_name: Option<&'a str>,
    pub pipeline_run_status: Option<RunStatus>,
    pub namespace: &'a str,
    pub task: &'a PipelineTask,
}

/// Step list shown in the task tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub task_name: String,
    pub is_spec_overview: bool,
    pub steps: Vec<StepStatus>,
}

/// Read-only display values for one task node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskNodeView {
    pub visual_name: String,
    pub status: TaskStatus,
    pub is_pipeline_run: bool,
    pub show_status: bool,
    pub steps: Vec<StepStatus>,
    pub step_counts: StepCounts,
    pub badge_color: &'static str,
    pub link: Option<String>,
    pub tooltip: Option<Tooltip>,
    pub resource_request: Option<ResourceRequest>,
}

impl TaskNodeView {
    #[must_use]
    pub fn build(input: &TaskNodeInput<'_>, fetched: &FetchResult<RawTask>, config: &VisConfig) -> Self {
        let status = resolve(input.pipeline_run_status, input.task.status.as_ref());
        let is_pipeline_run = input.pipeline_run_status.is_some();

        let steps = aggregate(step_definitions(fetched), &status);
        let visual_name = if input.task.name.is_empty() {
            fetched.get().map(|t| t.metadata.name.clone()).unwrap_or_default()
        } else {
            input.task.name.clone()
        };

        let link = task_link(input.pipeline_run_name, &input.task.name, input.namespace, fetched);

        let (tooltip, resource_request) = if config.disable_tooltip {
            (None, None)
        } else {
            let tooltip = Tooltip {
                task_name: visual_name.clone(),
                is_spec_overview: !is_pipeline_run,
                steps: steps.clone(),
            };
            (Some(tooltip), Some(input.task.task_ref.request(input.namespace)))
        };

        Self {
            step_counts: summarize(&steps),
            badge_color: status.reason.color_hint(),
            visual_name,
            status,
            is_pipeline_run,
            show_status: is_pipeline_run,
            steps,
            link,
            tooltip,
            resource_request,
        }
    }
}
