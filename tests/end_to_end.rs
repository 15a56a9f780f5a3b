use pipeline_vis::engine::error::VisError;
use pipeline_vis::engine::fetch::{RawTask, TaskKind};
use pipeline_vis::engine::snapshot::{load_json, PipelineRunSnapshot, TaskCatalog};
use pipeline_vis::engine::types::RunStatus;
use pipeline_vis::engine::view::{TaskNodeInput, TaskNodeView, VisConfig};
use std::fs;
use tempfile::TempDir;

const RUN: &str = r#"{
    "metadata": { "name": "release-7", "namespace": "ci" },
    "status": "Failed",
    "tasks": [
        { "name": "fetch-source", "taskRef": { "name": "git-clone", "kind": "ClusterTask" },
          "status": { "reason": "Succeeded", "duration": "14s" } },
        { "name": "build-image", "taskRef": { "name": "buildah" },
          "status": { "reason": "Running" } },
        { "name": "deploy", "taskRef": { "name": "kubectl-apply" } }
    ]
}"#;

fn write_fixtures() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("run.json"), RUN).unwrap();

    let tasks = dir.path().join("tasks");
    fs::create_dir(&tasks).unwrap();
    fs::write(
        tasks.join("buildah.json"),
        r#"{ "kind": "Task", "metadata": { "name": "buildah" },
             "spec": { "steps": [ { "name": "build" }, { "name": "push" } ] } }"#,
    )
    .unwrap();
    fs::write(
        tasks.join("git-clone.json"),
        r#"{ "kind": "ClusterTask", "metadata": { "name": "git-clone" },
             "spec": { "steps": [ { "name": "clone" } ] } }"#,
    )
    .unwrap();
    fs::write(tasks.join("notes.txt"), "ignored").unwrap();
    dir
}

fn build_nodes(dir: &TempDir) -> Vec<TaskNodeView> {
    let snapshot: PipelineRunSnapshot = load_json(&dir.path().join("run.json")).unwrap();
    let catalog = TaskCatalog::load_dir(&dir.path().join("tasks")).unwrap();
    let ns = snapshot.metadata.namespace.as_deref().unwrap_or("default");

    snapshot
        .tasks
        .iter()
        .map(|task| {
            let input = TaskNodeInput {
                pipeline_run_name: Some(snapshot.metadata.name.as_str()),
                pipeline_run_status: snapshot.status,
                namespace: ns,
                task,
            };
            TaskNodeView::build(&input, &catalog.fetch(&task.task_ref, ns), &VisConfig::default())
        })
        .collect()
}

#[test]
fn failed_run_renders_cancelled_build() {
    let dir = write_fixtures();
    let nodes = build_nodes(&dir);

    let build = &nodes[1];
    assert_eq!(build.visual_name, "build-image");
    assert_eq!(build.status.reason, RunStatus::Cancelled);
    let steps: Vec<_> = build.steps.iter().map(|s| (s.name.as_str(), s.status)).collect();
    assert_eq!(steps, vec![("build", RunStatus::Cancelled), ("push", RunStatus::Idle)]);
    assert_eq!(
        build.link.as_deref(),
        Some("/k8s/ns/ci/tekton.dev~v1beta1~PipelineRun/release-7/logs/build-image")
    );
}

#[test]
fn finished_tasks_keep_their_outcome() {
    let dir = write_fixtures();
    let nodes = build_nodes(&dir);

    let fetch = &nodes[0];
    assert_eq!(fetch.status.reason, RunStatus::Succeeded);
    assert_eq!(fetch.status.duration, "14s");
    assert_eq!(fetch.step_counts.succeeded, 1);
    assert_eq!(fetch.resource_request.as_ref().and_then(|r| r.namespace.clone()), None);
}

#[test]
fn missing_definition_and_status() {
    let dir = write_fixtures();
    let nodes = build_nodes(&dir);

    let deploy = &nodes[2];
    assert_eq!(deploy.status.reason, RunStatus::Idle);
    assert!(deploy.steps.is_empty());
    assert!(deploy.show_status);
}

#[test]
fn catalog_reads_only_json() {
    let dir = write_fixtures();
    let catalog = TaskCatalog::load_dir(&dir.path().join("tasks")).unwrap();
    let names: Vec<_> = catalog.tasks().iter().map(|t| t.metadata.name.as_str()).collect();
    assert_eq!(names, vec!["buildah", "git-clone"]);
    assert_eq!(catalog.of_kind(TaskKind::ClusterTask).len(), 1);
}

#[test]
fn load_errors_name_the_file() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();

    match load_json::<RawTask>(&bad) {
        Err(VisError::Json { path, .. }) => assert_eq!(path, bad),
        other => panic!("expected JSON error, got {other:?}"),
    }
    assert!(matches!(
        load_json::<RawTask>(&dir.path().join("missing.json")),
        Err(VisError::Io { .. })
    ));
}
