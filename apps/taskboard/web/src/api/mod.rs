use axum::{Router, routing::get};
use domain_tasks::{PageRenderer, SqliteTaskRepository, TaskResult, TaskService};

use crate::state::AppState;

pub mod export;
pub mod health;

/// Task pages and actions plus the database export.
pub fn routes(state: &AppState) -> TaskResult<Router> {
    let service = TaskService::new(SqliteTaskRepository::new(state.db.clone()));
    let pages = PageRenderer::new()?;

    Ok(domain_tasks::handlers::router(service, pages)
        .merge(export::router(state.config.database.path.clone())))
}

/// `/ready`, backed by a database ping.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
