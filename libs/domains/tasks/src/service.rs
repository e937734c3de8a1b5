use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CompletionStats, CreateTask, Task, TaskMutation, TaskStatus};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

// Manual impl: the derive would require `R: Clone`; only the `Arc` is cloned.
impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        let input = input.normalized();
        input.validate()?;

        self.repository.create(input.into()).await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task(&self, id: i64) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// List all tasks, newest first
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    /// Mark a task as completed.
    ///
    /// Completing an already completed task returns it unchanged.
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn complete_task(&self, id: i64) -> TaskResult<Task> {
        self.repository
            .update(id, TaskMutation::Complete { at: Utc::now() })
            .await
    }

    /// Delete a task
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i64) -> TaskResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }

    /// Completed and pending counts
    #[instrument(skip(self))]
    pub async fn completion_stats(&self) -> TaskResult<CompletionStats> {
        let total = self.repository.count(None).await?;
        let completed = self
            .repository
            .count(Some(TaskStatus::Completed))
            .await?;

        Ok(CompletionStats::from_counts(total, completed))
    }
}
