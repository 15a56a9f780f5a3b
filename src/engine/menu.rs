//! Task List Menu: the "add a task here" menu of the pipeline builder.
//!
//! The builder injects what happens on selection; this module only decides
//! which entries exist and dispatches to the right callback.

use super::error::{Result, VisError};
use super::fetch::RawTask;

pub const NO_TASKS_LABEL: &str = "No Tasks";
pub const SELECT_TASK_LABEL: &str = "Select Task";
pub const REMOVE_TASK_LABEL: &str = "Delete Task";

pub type NewTaskCallback<'a> = Box<dyn Fn(&RawTask) + 'a>;
pub type RemoveTaskCallback<'a> = Box<dyn Fn() + 'a>;

/// Callbacks supplied by the graph framework.
pub struct MenuCallbacks<'a> {
    pub on_new_task: NewTaskCallback<'a>,
    pub on_remove_task: Option<RemoveTaskCallback<'a>>,
}

/// A rendered menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    AddTask { label: String },
    RemoveTask { label: String },
}

impl MenuEntry {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::AddTask { label } | Self::RemoveTask { label } => label,
        }
    }
}

pub struct TaskListMenu<'a> {
    options: Vec<RawTask>,
    callbacks: MenuCallbacks<'a>,
}

impl<'a> TaskListMenu<'a> {
    /// Namespace tasks are listed before cluster tasks.
    #[must_use]
    pub fn new(namespace_tasks: &[RawTask], cluster_tasks: &[RawTask], callbacks: MenuCallbacks<'a>) -> Self {
        let options = namespace_tasks.iter().chain(cluster_tasks).cloned().collect();
        Self { options, callbacks }
    }

    /// The trigger is disabled when there is nothing to add.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.options.is_empty()
    }

    /// Label on the menu trigger.
    #[must_use]
    pub fn trigger_label<'s>(&self, unselected_text: Option<&'s str>) -> &'s str {
        if self.is_disabled() {
            NO_TASKS_LABEL
        } else {
            unselected_text.unwrap_or(SELECT_TASK_LABEL)
        }
    }

    /// Entries in display order; the remove entry, if any, comes last.
    #[must_use]
    pub fn entries(&self) -> Vec<MenuEntry> {
        let mut entries: Vec<_> = self
            .options
            .iter()
            .map(|t| MenuEntry::AddTask {
                label: t.metadata.name.clone(),
            })
            .collect();
        if self.callbacks.on_remove_task.is_some() {
            entries.push(MenuEntry::RemoveTask {
                label: REMOVE_TASK_LABEL.to_string(),
            });
        }
        entries
    }

    /// Invokes the callback behind the entry at `index`.
    ///
    /// # Errors
    /// Returns `NoSuchOption` if `index` is past the last entry.
    pub fn select(&self, index: usize) -> Result<()> {
        if let Some(task) = self.options.get(index) {
            tracing::debug!(task = %task.metadata.name, "adding task from menu");
            (self.callbacks.on_new_task)(task);
            return Ok(());
        }

        match (&self.callbacks.on_remove_task, index == self.options.len()) {
            (Some(remove), true) => {
                remove();
                Ok(())
            }
            _ => Err(VisError::NoSuchOption {
                index,
                available: self.entries().len(),
            }),
        }
    }
}
