//! Tasks Domain
//!
//! Task tracking: create, complete, delete and list tasks, plus the
//! completion report.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTML pages, form actions, chart JSON
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + SQLite implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Task record, transitions, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{PageRenderer, SqliteTaskRepository, TaskService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite://tasks.db?mode=rwc").await?;
//!
//! let service = TaskService::new(SqliteTaskRepository::new(db));
//! let routes = domain_tasks::handlers::router(service, PageRenderer::new()?);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sqlite;
pub mod templates;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use models::{
    ChartData, CompletionStats, CreateTask, NewTask, Task, TaskMutation, TaskStatus,
};
pub use repository::TaskRepository;
pub use service::TaskService;
pub use sqlite::SqliteTaskRepository;
pub use templates::PageRenderer;
