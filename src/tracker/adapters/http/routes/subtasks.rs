//! Subtask resource handlers.

use crate::tracker::adapters::http::dto::SubtaskPayload;
use crate::tracker::adapters::http::{ApiError, AppState};
use crate::tracker::domain::{ItemId, SubtaskDraft, SubtaskUpdate};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

pub(crate) async fn list_subtasks(State(state): State<AppState>) -> Json<Vec<SubtaskPayload>> {
    let store = state.store();
    Json(store.all_subtasks().iter().map(SubtaskPayload::from).collect())
}

pub(crate) async fn get_subtask(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<SubtaskPayload>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("invalid id"))?;
    let mut store = state.store();
    store
        .get_subtask(id)
        .map(|subtask| Json(SubtaskPayload::from(&subtask)))
        .ok_or_else(|| ApiError::not_found(format!("no subtask with id {id}")))
}

pub(crate) async fn submit_subtask(
    State(state): State<AppState>,
    payload: Result<Json<SubtaskPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<SubtaskPayload>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::not_found("malformed request body"))?;
    let schedule = payload.schedule()?;
    let mut store = state.store();
    let subtask = match payload.id {
        None => store.create_subtask(SubtaskDraft {
            epic_id: payload.epic_id,
            name: payload.name,
            description: payload.description,
            status: payload.status,
            schedule,
        })?,
        Some(id) => store.update_subtask(SubtaskUpdate {
            id,
            epic_id: payload.epic_id,
            name: payload.name,
            description: payload.description,
            status: payload.status,
            schedule,
        })?,
    };
    state.persist(&store)?;
    Ok((StatusCode::CREATED, Json(SubtaskPayload::from(&subtask))))
}

pub(crate) async fn delete_subtask(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("invalid id"))?;
    let mut store = state.store();
    store.delete_subtask(id)?;
    state.persist(&store)?;
    Ok(Json(json!({ "status": "deleted" })))
}
