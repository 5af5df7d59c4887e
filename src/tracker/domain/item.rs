//! Item kinds and the tagged union over the three entity types.

use super::{Epic, ItemId, ParseKindError, Status, Subtask, Task};
use std::fmt;

/// Discriminates the three kinds of tracked work items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Standalone task.
    Task,
    /// Container epic.
    Epic,
    /// Child subtask.
    Subtask,
}

impl ItemKind {
    /// Returns the canonical wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "TASK",
            Self::Epic => "EPIC",
            Self::Subtask => "SUBTASK",
        }
    }
}

impl TryFrom<&str> for ItemKind {
    type Error = ParseKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "TASK" => Ok(Self::Task),
            "EPIC" => Ok(Self::Epic),
            "SUBTASK" => Ok(Self::Subtask),
            _ => Err(ParseKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked entity of any kind.
///
/// Replaces subclass polymorphism with a tagged union so that mixed
/// collections (the view history, the prioritized view) stay homogeneous
/// and kind dispatch is exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem {
    /// Standalone task.
    Task(Task),
    /// Container epic.
    Epic(Epic),
    /// Child subtask.
    Subtask(Subtask),
}

impl WorkItem {
    /// Returns the item's identifier.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        match self {
            Self::Task(task) => task.id(),
            Self::Epic(epic) => epic.id(),
            Self::Subtask(subtask) => subtask.id(),
        }
    }

    /// Returns the item's kind tag.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Task(_) => ItemKind::Task,
            Self::Epic(_) => ItemKind::Epic,
            Self::Subtask(_) => ItemKind::Subtask,
        }
    }

    /// Returns the item's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Task(task) => task.name(),
            Self::Epic(epic) => epic.name(),
            Self::Subtask(subtask) => subtask.name(),
        }
    }

    /// Returns the item's progress state.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Task(task) => task.status(),
            Self::Epic(epic) => epic.status(),
            Self::Subtask(subtask) => subtask.status(),
        }
    }
}

impl From<Task> for WorkItem {
    fn from(task: Task) -> Self {
        Self::Task(task)
    }
}

impl From<Epic> for WorkItem {
    fn from(epic: Epic) -> Self {
        Self::Epic(epic)
    }
}

impl From<Subtask> for WorkItem {
    fn from(subtask: Subtask) -> Self {
        Self::Subtask(subtask)
    }
}
