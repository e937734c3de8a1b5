use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{NewTask, Task, TaskMutation, TaskStatus};

/// Repository trait for Task persistence
///
/// Every write is committed before the call returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task; the store assigns the id
    async fn create(&self, input: NewTask) -> TaskResult<Task>;

    /// Get a task by ID
    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// All tasks, newest first
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Apply a state transition.
    ///
    /// When a concurrent writer transitioned the row first, its result is
    /// returned unchanged.
    async fn update(&self, id: i64, mutation: TaskMutation) -> TaskResult<Task>;

    /// Delete a task by ID; `false` when nothing was deleted
    async fn delete(&self, id: i64) -> TaskResult<bool>;

    /// Count tasks, optionally only those with the given status
    async fn count(&self, status: Option<TaskStatus>) -> TaskResult<u64>;
}
