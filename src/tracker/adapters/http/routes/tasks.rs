//! Task resource handlers.

use crate::tracker::adapters::http::dto::TaskPayload;
use crate::tracker::adapters::http::{ApiError, AppState};
use crate::tracker::domain::{ItemId, TaskDraft, TaskUpdate};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

pub(crate) async fn list_tasks(State(state): State<AppState>) -> Json<Vec<TaskPayload>> {
    let store = state.store();
    Json(store.all_tasks().iter().map(TaskPayload::from).collect())
}

pub(crate) async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<TaskPayload>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("invalid id"))?;
    let mut store = state.store();
    store
        .get_task(id)
        .map(|task| Json(TaskPayload::from(&task)))
        .ok_or_else(|| ApiError::not_found(format!("no task with id {id}")))
}

pub(crate) async fn submit_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskPayload>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::not_found("malformed request body"))?;
    let schedule = payload.schedule()?;
    let mut store = state.store();
    let task = match payload.id {
        None => store.create_task(TaskDraft {
            name: payload.name,
            description: payload.description,
            status: payload.status,
            schedule,
        })?,
        Some(id) => store.update_task(TaskUpdate {
            id,
            name: payload.name,
            description: payload.description,
            status: payload.status,
            schedule,
        })?,
    };
    state.persist(&store)?;
    Ok((StatusCode::CREATED, Json(TaskPayload::from(&task))))
}

pub(crate) async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("invalid id"))?;
    let mut store = state.store();
    store.delete_task(id)?;
    state.persist(&store)?;
    Ok(Json(json!({ "status": "deleted" })))
}
