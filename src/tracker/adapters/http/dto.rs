//! Wire payloads owned by the HTTP façade.
//!
//! The engine never sees these types; handlers decode them into domain
//! drafts and updates, and encode domain values back. Field names are
//! camelCase on the wire; instants are RFC 3339 and durations are whole
//! minutes.

use super::error::ApiError;
use crate::tracker::domain::{Epic, ItemId, Schedule, Status, Subtask, Task, WorkItem};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Decodes the optional `(startTime, durationMinutes)` pair.
///
/// A window needs both halves; a lone start or a lone duration leaves the
/// item unscheduled, matching the engine's "both present or undefined"
/// rule for the derived end.
fn decode_schedule(
    start: Option<DateTime<Utc>>,
    minutes: Option<i64>,
) -> Result<Option<Schedule>, ApiError> {
    match (start, minutes) {
        (Some(start), Some(minutes)) => Schedule::new(start, TimeDelta::minutes(minutes))
            .map(Some)
            .map_err(|err| ApiError::not_found(err.to_string())),
        _ => Ok(None),
    }
}

/// Task payload for requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    /// Present on responses; on POST bodies it selects update over create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Progress state; absent on a request preserves or defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Window start instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Window length in whole minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    /// Derived window end; response-only, ignored on input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl TaskPayload {
    /// Decodes the request's scheduling window, if any.
    pub(crate) fn schedule(&self) -> Result<Option<Schedule>, ApiError> {
        decode_schedule(self.start_time, self.duration_minutes)
    }
}

impl From<&Task> for TaskPayload {
    fn from(task: &Task) -> Self {
        Self {
            id: Some(task.id()),
            name: task.name().to_owned(),
            description: task.description().to_owned(),
            status: Some(task.status()),
            start_time: task.schedule().map(|window| window.start()),
            duration_minutes: task.schedule().map(|window| window.duration().num_minutes()),
            end_time: task.end(),
        }
    }
}

/// Epic payload for requests and responses.
///
/// Status, time fields, and the subtask list are store-derived: they are
/// filled on responses and ignored on input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicPayload {
    /// Present on responses; on POST bodies it selects update over create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Derived progress state; response-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Owned subtask ids in insertion order; response-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtask_ids: Option<Vec<ItemId>>,
    /// Derived earliest child start; response-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Derived summed child duration in whole minutes; response-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    /// Derived latest child end; response-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl From<&Epic> for EpicPayload {
    fn from(epic: &Epic) -> Self {
        Self {
            id: Some(epic.id()),
            name: epic.name().to_owned(),
            description: epic.description().to_owned(),
            status: Some(epic.status()),
            subtask_ids: Some(epic.subtask_ids().to_vec()),
            start_time: epic.window().map(|window| window.start()),
            duration_minutes: epic.window().map(|window| window.duration().num_minutes()),
            end_time: epic.window().map(|window| window.end()),
        }
    }
}

/// Subtask payload for requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskPayload {
    /// Present on responses; on POST bodies it selects update over create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    /// Owning epic; required on every request.
    pub epic_id: ItemId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Progress state; absent on a request preserves or defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Window start instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Window length in whole minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    /// Derived window end; response-only, ignored on input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl SubtaskPayload {
    /// Decodes the request's scheduling window, if any.
    pub(crate) fn schedule(&self) -> Result<Option<Schedule>, ApiError> {
        decode_schedule(self.start_time, self.duration_minutes)
    }
}

impl From<&Subtask> for SubtaskPayload {
    fn from(subtask: &Subtask) -> Self {
        Self {
            id: Some(subtask.id()),
            epic_id: subtask.epic_id(),
            name: subtask.name().to_owned(),
            description: subtask.description().to_owned(),
            status: Some(subtask.status()),
            start_time: subtask.schedule().map(|window| window.start()),
            duration_minutes: subtask
                .schedule()
                .map(|window| window.duration().num_minutes()),
            end_time: subtask.end(),
        }
    }
}

/// Response payload for mixed work-item collections (history and the
/// prioritized view), flattened with a kind tag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemPayload {
    /// Kind tag: `TASK`, `EPIC`, or `SUBTASK`.
    pub kind: &'static str,
    /// Item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Progress state.
    pub status: Status,
    /// Owning epic, on subtasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<ItemId>,
    /// Owned subtask ids, on epics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtask_ids: Option<Vec<ItemId>>,
    /// Window start instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Window length in whole minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    /// Window end instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl From<&WorkItem> for WorkItemPayload {
    fn from(item: &WorkItem) -> Self {
        match item {
            WorkItem::Task(task) => Self {
                kind: item.kind().as_str(),
                id: task.id(),
                name: task.name().to_owned(),
                description: task.description().to_owned(),
                status: task.status(),
                epic_id: None,
                subtask_ids: None,
                start_time: task.schedule().map(|window| window.start()),
                duration_minutes: task.schedule().map(|window| window.duration().num_minutes()),
                end_time: task.end(),
            },
            WorkItem::Epic(epic) => Self {
                kind: item.kind().as_str(),
                id: epic.id(),
                name: epic.name().to_owned(),
                description: epic.description().to_owned(),
                status: epic.status(),
                epic_id: None,
                subtask_ids: Some(epic.subtask_ids().to_vec()),
                start_time: epic.window().map(|window| window.start()),
                duration_minutes: epic.window().map(|window| window.duration().num_minutes()),
                end_time: epic.window().map(|window| window.end()),
            },
            WorkItem::Subtask(subtask) => Self {
                kind: item.kind().as_str(),
                id: subtask.id(),
                name: subtask.name().to_owned(),
                description: subtask.description().to_owned(),
                status: subtask.status(),
                epic_id: Some(subtask.epic_id()),
                subtask_ids: None,
                start_time: subtask.schedule().map(|window| window.start()),
                duration_minutes: subtask
                    .schedule()
                    .map(|window| window.duration().num_minutes()),
                end_time: subtask.end(),
            },
        }
    }
}
