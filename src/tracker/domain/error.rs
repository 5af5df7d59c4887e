//! Error types for the tracking engine and domain parsing.

use super::{ItemId, ItemKind};
use chrono::TimeDelta;
use thiserror::Error;

/// Result type for task store operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors returned by task store operations.
///
/// Every variant is non-fatal and leaves the store unchanged; callers map
/// the variants onto their own failure surface (the HTTP façade picks
/// response codes from them).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
    /// The operation referenced an id absent from the relevant table.
    #[error("no {kind} with id {id}")]
    NotFound {
        /// Kind of the item that failed to resolve.
        kind: ItemKind,
        /// Identifier that failed to resolve.
        id: ItemId,
    },

    /// A subtask update named an epic whose subtask list does not contain
    /// the subtask (cross-epic reassignment is not supported).
    #[error("subtask {subtask} is not attached to epic {epic}")]
    EpicMismatch {
        /// Subtask being updated.
        subtask: ItemId,
        /// Epic the update claims as parent.
        epic: ItemId,
    },

    /// The proposed scheduling window overlaps an existing prioritized
    /// entry.
    #[error("scheduling window overlaps an existing entry")]
    SchedulingConflict,
}

/// Errors returned while constructing scheduling windows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The duration is negative.
    #[error("duration must not be negative, got {0}")]
    NegativeDuration(TimeDelta),
}

/// Error returned while parsing a status from its wire representation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(pub String);

/// Error returned while parsing an item kind from its wire representation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown item kind: {0}")]
pub struct ParseKindError(pub String);
