mod actions;
mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::{TaskError, TaskResult};
use crate::repository::TaskRepository;
use crate::service::TaskService;
use crate::templates::PageRenderer;

/// Shared handler state.
pub struct TasksState<R: TaskRepository> {
    pub service: TaskService<R>,
    pub pages: PageRenderer,
}

// Manual impl: the derive would require `R: Clone`.
impl<R: TaskRepository> Clone for TasksState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            pages: self.pages.clone(),
        }
    }
}

/// Routes for the task pages, form actions and chart data.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>, pages: PageRenderer) -> Router {
    let state = TasksState { service, pages };

    Router::new()
        .route("/", get(pages::index))
        .route("/reports", get(pages::reports))
        .route("/chart-data", get(pages::chart_data))
        .route("/add", post(actions::add_task))
        .route("/complete/{id}", get(actions::complete_task))
        .route("/delete/{id}", get(actions::delete_task))
        .with_state(state)
}

/// Path ids are taken as strings so a non-integer id is a 400 with the
/// standard error body instead of the extractor's plain-text rejection.
fn parse_id(raw: &str) -> TaskResult<i64> {
    raw.parse()
        .map_err(|_| TaskError::Validation(format!("Invalid task id: {}", raw)))
}
