//! Persistence port: full-snapshot save and load with its own failure
//! taxonomy, kept distinct from engine errors.

use crate::tracker::domain::{Epic, Subtask, Task};
use thiserror::Error;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Complete entity state of a task store.
///
/// The snapshot carries only the three entity tables; derived state (the
/// view history, the priority index, epic aggregates) is rebuilt by
/// [`TaskStore::from_snapshot`](crate::tracker::services::TaskStore::from_snapshot).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Standalone tasks in id order.
    pub tasks: Vec<Task>,
    /// Epics in id order.
    pub epics: Vec<Epic>,
    /// Subtasks in id order.
    pub subtasks: Vec<Subtask>,
}

/// Persistence contract for the task store.
///
/// Implementations must be all-or-nothing: a failed save or load reports
/// [`ArchiveError`] without leaving partial state for the caller to
/// observe, and neither operation touches the in-memory store.
pub trait Archive: Send + Sync {
    /// Writes a full snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] on filesystem failure and
    /// [`ArchiveError::UnwritableField`] when an entity field cannot be
    /// represented in the storage format.
    fn save(&self, snapshot: &StoreSnapshot) -> ArchiveResult<()>;

    /// Reads the most recently saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] on filesystem failure and
    /// [`ArchiveError::Malformed`] when a stored record cannot be decoded.
    fn load(&self) -> ArchiveResult<StoreSnapshot>;
}

/// Errors returned by archive implementations.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Underlying filesystem failure.
    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be decoded.
    #[error("malformed archive record '{line}': {reason}")]
    Malformed {
        /// Offending record line.
        line: String,
        /// Why decoding failed.
        reason: String,
    },

    /// A field value cannot be written without corrupting the storage
    /// format.
    #[error("field value {0:?} cannot be represented in the archive format")]
    UnwritableField(String),
}
