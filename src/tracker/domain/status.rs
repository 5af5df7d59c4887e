//! Work item progress states and the epic aggregation partition.

use super::ParseStatusError;
use serde::{Deserialize, Serialize};

/// Progress state of a tracked work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Work has not started.
    New,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Done,
}

impl Status {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    /// Derives an epic's status from the statuses of its subtasks.
    ///
    /// An empty input or an all-`NEW` input yields [`Status::New`]; a
    /// non-empty all-`DONE` input yields [`Status::Done`]; any other mix
    /// forces [`Status::InProgress`]. This is a three-way partition, not an
    /// average: a single `IN_PROGRESS` child, or a mix of `NEW` and `DONE`
    /// children, is enough to hold the epic in progress.
    #[must_use]
    pub fn aggregate<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut total = 0usize;
        let mut new = 0usize;
        let mut done = 0usize;
        for status in statuses {
            total += 1;
            match status {
                Self::New => new += 1,
                Self::Done => done += 1,
                Self::InProgress => {}
            }
        }

        if total == 0 || new == total {
            Self::New
        } else if done == total {
            Self::Done
        } else {
            Self::InProgress
        }
    }
}

impl TryFrom<&str> for Status {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "NEW" => Ok(Self::New),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}
