use chrono::{DateTime, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Task status
///
/// Stored as the strings `Pending` and `Completed`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum TaskStatus {
    #[default]
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Completed")]
    Completed,
}

/// A stored task.
///
/// Instances are never edited in place; transitions produce a new value
/// (see [`Task::complete`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Assigned by the store, never reused
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    /// Present exactly when `status` is `Completed`
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// The Pending -> Completed transition.
    ///
    /// Returns `None` when the task is already completed, so the original
    /// completion time is kept. `at` is clamped so that `completed_at` never
    /// precedes `created_at`.
    pub fn complete(&self, at: DateTime<Utc>) -> Option<Task> {
        if self.is_completed() {
            return None;
        }

        Some(Task {
            status: TaskStatus::Completed,
            completed_at: Some(at.max(self.created_at)),
            ..self.clone()
        })
    }
}

/// Validated input handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
}

/// Form payload for `POST /add`.
///
/// A missing `title` field deserializes to an empty string so that it is
/// rejected by validation (400) rather than by the extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTask {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "title must be between 1 and 100 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTask {
    /// Trim the title and drop a blank description.
    pub fn normalized(self) -> Self {
        let description = self.description.filter(|d| !d.trim().is_empty());
        Self {
            title: self.title.trim().to_string(),
            description,
        }
    }
}

impl From<CreateTask> for NewTask {
    fn from(input: CreateTask) -> Self {
        Self {
            title: input.title,
            description: input.description,
        }
    }
}

/// A state transition applied by [`TaskRepository::update`](crate::TaskRepository::update).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMutation {
    Complete { at: DateTime<Utc> },
}

impl TaskMutation {
    /// The task after this mutation, or `None` if it changes nothing.
    pub fn apply(&self, task: &Task) -> Option<Task> {
        match self {
            TaskMutation::Complete { at } => task.complete(*at),
        }
    }
}

/// Completed vs pending counts for the reports page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CompletionStats {
    pub completed_count: u64,
    pub pending_count: u64,
}

impl CompletionStats {
    /// Build from two independently taken counts.
    ///
    /// The counts are not snapshotted together, so `completed` may exceed
    /// `total` under concurrent writes; pending saturates at zero.
    pub fn from_counts(total: u64, completed: u64) -> Self {
        Self {
            completed_count: completed,
            pending_count: total.saturating_sub(completed),
        }
    }

    pub fn total(&self) -> u64 {
        self.completed_count + self.pending_count
    }

    /// Percentage of completed tasks, 0.0 when there are none.
    pub fn completion_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.completed_count as f64 * 100.0 / total as f64,
        }
    }
}

/// Body of `GET /chart-data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: [&'static str; 2],
    pub data: [u64; 2],
}

impl From<CompletionStats> for ChartData {
    fn from(stats: CompletionStats) -> Self {
        Self {
            labels: ["Completed", "Pending"],
            data: [stats.completed_count, stats.pending_count],
        }
    }
}
