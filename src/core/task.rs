//! Task records and their working-copy store.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bridge::{self, Bridge};

use super::store::{Persistence, Record, WorkingCopy};

/// A reusable prompt template.
///
/// `task_description` is the behavior definition sent to the model as
/// instructions; the text a run transforms arrives separately as input.
/// Field names serialize in camelCase to match the stored wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable unique id, assigned at creation.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Instruction template for the model.
    pub task_description: String,
}

impl Task {
    /// A task is valid when neither name nor description is blank.
    /// Whitespace-only counts as blank.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.task_description.trim().is_empty()
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields supplied when creating a task; the store assigns the id.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    /// Display name.
    pub name: String,
    /// Instruction template for the model.
    pub task_description: String,
}

#[derive(Clone)]
struct TaskAdapter {
    bridge: Arc<dyn Bridge>,
}

#[async_trait]
impl Persistence for TaskAdapter {
    type Item = Task;

    async fn hydrate(&self) -> bridge::Result<Vec<Task>> {
        self.bridge.load_tasks().await
    }

    async fn persist(&self, items: Vec<Task>) -> bridge::Result<()> {
        self.bridge.save_tasks(items).await
    }
}

/// Working copy of the task list.
///
/// Creation, edit, and removal touch only local state;
/// [`TaskStore::commit`] flushes the whole list to the host bridge.
pub struct TaskStore {
    inner: WorkingCopy<TaskAdapter>,
}

impl TaskStore {
    /// Create an empty store over the given bridge.
    #[must_use]
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self {
            inner: WorkingCopy::new(TaskAdapter { bridge }),
        }
    }

    /// Hydrate from the host, replacing local state.
    ///
    /// # Errors
    ///
    /// Returns the bridge error on failure; the store keeps its current
    /// (initially empty) list and the caller may retry.
    pub async fn load(&mut self) -> bridge::Result<&[Task]> {
        self.inner.load().await?;
        Ok(self.inner.items())
    }

    /// All tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.inner.items()
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.inner.get(id)
    }

    /// Create a task from a draft and append it to the list.
    ///
    /// Drafts are accepted as-is, blank fields included; validity is the
    /// caller's gate, checked via [`TaskStore::all_valid`] before a commit.
    pub fn add(&mut self, draft: TaskDraft) -> Task {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            task_description: draft.task_description,
        };
        self.inner.append(task.clone());
        task
    }

    /// Replace the task with a matching id, keeping its position.
    ///
    /// Returns `false` if no task matches.
    pub fn edit(&mut self, task: Task) -> bool {
        self.inner.replace(task)
    }

    /// Remove a task by id.
    ///
    /// Returns `false` if no task matches.
    pub fn remove(&mut self, id: &str) -> bool {
        self.inner.remove(id)
    }

    /// Whether every task in the list is valid.
    #[must_use]
    pub fn all_valid(&self) -> bool {
        self.tasks().iter().all(Task::is_valid)
    }

    /// Flush a snapshot of the task list to the host.
    ///
    /// See [`WorkingCopy::commit`] for the snapshot semantics.
    pub fn commit(&self) -> BoxFuture<'static, bridge::Result<()>> {
        tracing::debug!(count = self.tasks().len(), "committing task list");
        self.inner.commit()
    }
}
