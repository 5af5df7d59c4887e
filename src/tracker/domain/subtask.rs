//! Subtask entity: a task owned by exactly one epic.

use super::{ItemId, Schedule, Status};
use chrono::{DateTime, Utc};

/// A task owned by exactly one epic.
///
/// The owning epic is fixed at creation; there is no re-parenting path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    id: ItemId,
    epic_id: ItemId,
    name: String,
    description: String,
    status: Status,
    schedule: Option<Schedule>,
}

impl Subtask {
    /// Assembles a stored subtask. Only the store and the persistence
    /// codec construct subtasks; callers go through [`SubtaskDraft`].
    pub(crate) const fn new(
        id: ItemId,
        epic_id: ItemId,
        name: String,
        description: String,
        status: Status,
        schedule: Option<Schedule>,
    ) -> Self {
        Self {
            id,
            epic_id,
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

    /// Returns the owning epic's identifier.
    #[must_use]
    pub const fn epic_id(&self) -> ItemId {
        self.epic_id
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

    /// Returns the derived end instant when the subtask is scheduled.
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.schedule.map(|window| window.end())
    }
}

/// Creation payload for a subtask; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskDraft {
    /// Owning epic; must exist at creation time.
    pub epic_id: ItemId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Initial status; defaults to [`Status::New`] when absent.
    pub status: Option<Status>,
    /// Optional scheduling window.
    pub schedule: Option<Schedule>,
}

/// Full-replacement update payload for a stored subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskUpdate {
    /// Target subtask id.
    pub id: ItemId,
    /// Owning epic; must match the stored parent (no re-parenting).
    pub epic_id: ItemId,
    /// Replacement name.
    pub name: String,
    /// Replacement description.
    pub description: String,
    /// Replacement status; `None` preserves the stored status.
    pub status: Option<Status>,
    /// Replacement window; `None` clears it.
    pub schedule: Option<Schedule>,
}
