//! Read-only view handlers: history and the prioritized ordering.

use crate::tracker::adapters::http::AppState;
use crate::tracker::adapters::http::dto::WorkItemPayload;
use axum::Json;
use axum::extract::State;

pub(crate) async fn history(State(state): State<AppState>) -> Json<Vec<WorkItemPayload>> {
    let store = state.store();
    Json(store.history().iter().map(WorkItemPayload::from).collect())
}

pub(crate) async fn prioritized(State(state): State<AppState>) -> Json<Vec<WorkItemPayload>> {
    let store = state.store();
    Json(store.prioritized().iter().map(WorkItemPayload::from).collect())
}
