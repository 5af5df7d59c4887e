//! Epic entity: a container task with store-derived status and window.

use super::{EpicWindow, ItemId, Status};

/// A container task whose status and time window derive from its subtasks.
///
/// Callers may set only the name and description; the status, the window,
/// and the subtask-id list are maintained exclusively by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Epic {
    id: ItemId,
    name: String,
    description: String,
    status: Status,
    window: Option<EpicWindow>,
    subtask_ids: Vec<ItemId>,
}

impl Epic {
    /// Assembles a fresh epic with no subtasks: status `NEW`, no window.
    pub(crate) const fn new(id: ItemId, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
            status: Status::New,
            window: None,
            subtask_ids: Vec::new(),
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

    /// Returns the derived progress state.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the derived time window, if any subtask is scheduled.
    #[must_use]
    pub const fn window(&self) -> Option<EpicWindow> {
        self.window
    }

    /// Returns the owned subtask ids in insertion order.
    #[must_use]
    pub fn subtask_ids(&self) -> &[ItemId] {
        &self.subtask_ids
    }

    /// Replaces the caller-mutable fields.
    pub(crate) fn set_details(&mut self, name: String, description: String) {
        self.name = name;
        self.description = description;
    }

    /// Appends a subtask id to the ownership list.
    pub(crate) fn attach_subtask(&mut self, id: ItemId) {
        self.subtask_ids.push(id);
    }

    /// Removes a subtask id from the ownership list; no-op when absent.
    pub(crate) fn detach_subtask(&mut self, id: ItemId) {
        self.subtask_ids.retain(|existing| *existing != id);
    }

    /// Empties the ownership list.
    pub(crate) fn clear_subtasks(&mut self) {
        self.subtask_ids.clear();
    }

    /// Overwrites the store-derived fields after recomputation.
    pub(crate) fn set_derived(&mut self, status: Status, window: Option<EpicWindow>) {
        self.status = status;
        self.window = window;
    }
}

/// Creation payload for an epic; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpicDraft {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Update payload for an epic; only name and description are caller-mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpicUpdate {
    /// Target epic id.
    pub id: ItemId,
    /// Replacement name.
    pub name: String,
    /// Replacement description.
    pub description: String,
}
