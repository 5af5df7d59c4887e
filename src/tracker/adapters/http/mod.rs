//! HTTP façade: routes, wire payloads, and status-code mapping.
//!
//! Endpoints:
//!
//! ```text
//! GET    /tasks            GET/DELETE /tasks/{id}       POST /tasks
//! GET    /epics            GET/DELETE /epics/{id}       POST /epics
//! GET    /epics/{id}/subtasks
//! GET    /subtasks         GET/DELETE /subtasks/{id}    POST /subtasks
//! GET    /history
//! GET    /prioritized
//! ```
//!
//! A POST body without an id creates; a body carrying an id updates.
//! Store not-found maps to 404, scheduling conflicts to 406, and any
//! unexpected failure to 404 (fail-closed). The façade owns all JSON
//! encoding; the engine only ever sees domain values.

pub mod dto;
mod error;
mod routes;

pub use error::ApiError;

use crate::tracker::ports::Archive;
use crate::tracker::services::TaskStore;
use axum::Router;
use axum::routing::get;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info};

/// Shared façade state: the engine behind one mutex, plus the archive
/// written after every mutation.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<TaskStore>>,
    archive: Option<Arc<dyn Archive>>,
}

impl AppState {
    /// Wraps a store, optionally persisting through `archive` after each
    /// mutating request.
    #[must_use]
    pub fn new(store: TaskStore, archive: Option<Arc<dyn Archive>>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            archive,
        }
    }

    /// Locks the engine for the duration of one operation.
    ///
    /// The engine's tables, counter, and indexes mutate as a unit, so this
    /// single mutex is the serialization it requires of a concurrent host.
    pub(crate) fn store(&self) -> MutexGuard<'_, TaskStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Saves a snapshot after a mutation.
    ///
    /// The in-memory outcome of the engine call stands either way; a save
    /// failure is logged and surfaced to the client.
    pub(crate) fn persist(&self, store: &TaskStore) -> Result<(), ApiError> {
        if let Some(archive) = &self.archive {
            if let Err(cause) = archive.save(&store.snapshot()) {
                error!(%cause, "snapshot save failed");
                return Err(ApiError::from(cause));
            }
        }
        Ok(())
    }
}

/// Builds the façade router over `state`.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::submit_task),
        )
        .route(
            "/tasks/{id}",
            get(routes::tasks::get_task).delete(routes::tasks::delete_task),
        )
        .route(
            "/epics",
            get(routes::epics::list_epics).post(routes::epics::submit_epic),
        )
        .route(
            "/epics/{id}",
            get(routes::epics::get_epic).delete(routes::epics::delete_epic),
        )
        .route("/epics/{id}/subtasks", get(routes::epics::epic_subtasks))
        .route(
            "/subtasks",
            get(routes::subtasks::list_subtasks).post(routes::subtasks::submit_subtask),
        )
        .route(
            "/subtasks/{id}",
            get(routes::subtasks::get_subtask).delete(routes::subtasks::delete_subtask),
        )
        .route("/history", get(routes::views::history))
        .route("/prioritized", get(routes::views::prioritized))
        .with_state(state)
}

/// Binds `addr` and serves the façade until the process is stopped.
///
/// # Errors
///
/// Returns the underlying I/O error when binding or serving fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "taskboard API listening");
    axum::serve(listener, build_router(state)).await
}
