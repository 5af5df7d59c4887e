//! Scheduling windows and derived epic time aggregates.

use super::ScheduleError;
use chrono::{DateTime, TimeDelta, Utc};

/// Validated scheduling window for a task or subtask.
///
/// A window is a start instant plus a non-negative duration; the end
/// instant is derived. Windows are half-open `[start, end)` intervals for
/// conflict purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    start: DateTime<Utc>,
    duration: TimeDelta,
}

impl Schedule {
    /// Creates a window from a start instant and a non-negative duration.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::NegativeDuration`] when `duration` is
    /// negative.
    pub fn new(start: DateTime<Utc>, duration: TimeDelta) -> Result<Self, ScheduleError> {
        if duration < TimeDelta::zero() {
            return Err(ScheduleError::NegativeDuration(duration));
        }
        Ok(Self { start, duration })
    }

    /// Returns the start instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the duration.
    #[must_use]
    pub const fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// Returns the exclusive end instant.
    ///
    /// Saturates at the maximum representable instant rather than
    /// overflowing.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.start
            .checked_add_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Reports whether two windows intersect.
    ///
    /// Uses strict interval intersection over half-open windows:
    /// `self.start < other.end && self.end > other.start`. Windows that
    /// merely touch do not overlap, and a zero-duration window never
    /// conflicts with anything.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && self.end() > other.start
    }
}

/// Store-derived time aggregate for an epic.
///
/// Unlike [`Schedule`], the end instant is stored rather than derived: an
/// epic's duration is the *sum* of its children's durations, while its end
/// is the *latest* child end, and the two do not generally agree when the
/// children leave gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpicWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration: TimeDelta,
}

impl EpicWindow {
    /// Assembles a window from its three components.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>, duration: TimeDelta) -> Self {
        Self {
            start,
            end,
            duration,
        }
    }

    /// Aggregates child windows: earliest start, latest end, summed
    /// duration. Returns `None` when no child carries a window.
    #[must_use]
    pub fn aggregate<'a, I>(windows: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Schedule>,
    {
        let mut aggregate: Option<Self> = None;
        for window in windows {
            let end = window.end();
            aggregate = Some(match aggregate {
                None => Self::new(window.start(), end, window.duration()),
                Some(acc) => Self::new(
                    acc.start.min(window.start()),
                    acc.end.max(end),
                    acc.duration + window.duration(),
                ),
            });
        }
        aggregate
    }

    /// Returns the earliest child start.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the latest child end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the summed child duration.
    #[must_use]
    pub const fn duration(&self) -> TimeDelta {
        self.duration
    }
}
