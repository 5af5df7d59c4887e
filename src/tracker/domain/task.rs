//! Standalone task entity and its creation and update payloads.

use super::{ItemId, Schedule, Status};
use chrono::{DateTime, Utc};

/// A standalone unit of work with an optional scheduling window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: ItemId,
    name: String,
    description: String,
    status: Status,
    schedule: Option<Schedule>,
}

impl Task {
    /// Assembles a stored task. Only the store and the persistence codec
    /// construct tasks; callers go through [`TaskDraft`].
    pub(crate) const fn new(
        id: ItemId,
        name: String,
        description: String,
        status: Status,
        schedule: Option<Schedule>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            status,
            schedule,
        }
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the progress state.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the scheduling window, if any.
    #[must_use]
    pub const fn schedule(&self) -> Option<Schedule> {
        self.schedule
    }

    /// Returns the derived end instant when the task is scheduled.
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.schedule.map(|window| window.end())
    }
}

/// Creation payload for a standalone task; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Initial status; defaults to [`Status::New`] when absent.
    pub status: Option<Status>,
    /// Optional scheduling window.
    pub schedule: Option<Schedule>,
}

/// Full-replacement update payload for a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Target task id.
    pub id: ItemId,
    /// Replacement name.
    pub name: String,
    /// Replacement description.
    pub description: String,
    /// Replacement status; `None` preserves the stored status.
    pub status: Option<Status>,
    /// Replacement window; `None` clears it.
    pub schedule: Option<Schedule>,
}
