//! Epic resource handlers.

use crate::tracker::adapters::http::dto::{EpicPayload, SubtaskPayload};
use crate::tracker::adapters::http::{ApiError, AppState};
use crate::tracker::domain::{EpicDraft, EpicUpdate, ItemId};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

pub(crate) async fn list_epics(State(state): State<AppState>) -> Json<Vec<EpicPayload>> {
    let store = state.store();
    Json(store.all_epics().iter().map(EpicPayload::from).collect())
}

pub(crate) async fn get_epic(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<EpicPayload>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("invalid id"))?;
    let mut store = state.store();
    store
        .get_epic(id)
        .map(|epic| Json(EpicPayload::from(&epic)))
        .ok_or_else(|| ApiError::not_found(format!("no epic with id {id}")))
}

pub(crate) async fn submit_epic(
    State(state): State<AppState>,
    payload: Result<Json<EpicPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<EpicPayload>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::not_found("malformed request body"))?;
    let mut store = state.store();
    // Derived fields on the body (status, times, subtask ids) are ignored;
    // only name and description pass through.
    let epic = match payload.id {
        None => store.create_epic(EpicDraft {
            name: payload.name,
            description: payload.description,
        }),
        Some(id) => store.update_epic(EpicUpdate {
            id,
            name: payload.name,
            description: payload.description,
        })?,
    };
    state.persist(&store)?;
    Ok((StatusCode::CREATED, Json(EpicPayload::from(&epic))))
}

pub(crate) async fn delete_epic(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("invalid id"))?;
    let mut store = state.store();
    store.delete_epic(id)?;
    state.persist(&store)?;
    Ok(Json(json!({ "status": "deleted" })))
}

pub(crate) async fn epic_subtasks(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<Vec<SubtaskPayload>>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("invalid id"))?;
    let store = state.store();
    Ok(Json(
        store
            .epic_subtasks(id)
            .iter()
            .map(SubtaskPayload::from)
            .collect(),
    ))
}
