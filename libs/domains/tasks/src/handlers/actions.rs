use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};

use super::{TasksState, parse_id};
use crate::error::TaskResult;
use crate::models::CreateTask;
use crate::repository::TaskRepository;

// Every action answers with 303 See Other back to the list.

pub async fn add_task<R: TaskRepository>(
    State(state): State<TasksState<R>>,
    Form(input): Form<CreateTask>,
) -> TaskResult<Redirect> {
    state.service.create_task(input).await?;
    Ok(Redirect::to("/"))
}

pub async fn complete_task<R: TaskRepository>(
    State(state): State<TasksState<R>>,
    Path(id): Path<String>,
) -> TaskResult<Redirect> {
    state.service.complete_task(parse_id(&id)?).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_task<R: TaskRepository>(
    State(state): State<TasksState<R>>,
    Path(id): Path<String>,
) -> TaskResult<Redirect> {
    state.service.delete_task(parse_id(&id)?).await?;
    Ok(Redirect::to("/"))
}
