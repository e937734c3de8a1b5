use axum::{
    Json,
    extract::State,
    response::Html,
};

use super::TasksState;
use crate::error::TaskResult;
use crate::models::ChartData;
use crate::repository::TaskRepository;

pub async fn index<R: TaskRepository>(
    State(state): State<TasksState<R>>,
) -> TaskResult<Html<String>> {
    let tasks = state.service.list_tasks().await?;
    Ok(Html(state.pages.render_index(&tasks)?))
}

pub async fn reports<R: TaskRepository>(
    State(state): State<TasksState<R>>,
) -> TaskResult<Html<String>> {
    let tasks = state.service.list_tasks().await?;
    let stats = state.service.completion_stats().await?;
    Ok(Html(state.pages.render_reports(&tasks, &stats)?))
}

/// `{"labels": ["Completed", "Pending"], "data": [completed, pending]}`
pub async fn chart_data<R: TaskRepository>(
    State(state): State<TasksState<R>>,
) -> TaskResult<Json<ChartData>> {
    let stats = state.service.completion_stats().await?;
    Ok(Json(stats.into()))
}
