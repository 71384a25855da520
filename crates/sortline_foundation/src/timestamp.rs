//! Event ordering keys.
//!
//! A [`Timestamp`] pairs the wall-clock instant an event was logged with the
//! 1-based source line it came from. Log lines routinely share a millisecond,
//! so the line number is what makes the order total.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordering key for a single log event.
///
/// Ordering compares wall-clock instants first (offsets are normalized, so
/// `10:00+02:00` and `08:00+00:00` are the same instant) and falls back to the
/// source line number on ties.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp {
    wall_clock: DateTime<FixedOffset>,
    line: u32,
}

impl Timestamp {
    /// Creates a timestamp from a wall-clock instant and a source line number.
    #[must_use]
    pub const fn new(wall_clock: DateTime<FixedOffset>, line: u32) -> Self {
        Self { wall_clock, line }
    }

    /// Returns the wall-clock instant.
    #[must_use]
    pub const fn wall_clock(&self) -> DateTime<FixedOffset> {
        self.wall_clock
    }

    /// Returns the source line number the event was read from.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the local time of day, as it appeared in the log line.
    #[must_use]
    pub fn time_of_day(&self) -> NaiveTime {
        self.wall_clock.time()
    }

    /// Returns a timestamp at the same instant attributed to another line.
    #[must_use]
    pub const fn at_line(self, line: u32) -> Self {
        Self {
            wall_clock: self.wall_clock,
            line,
        }
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.wall_clock
            .cmp(&other.wall_clock)
            .then_with(|| self.line.cmp(&other.line))
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {})",
            self.wall_clock.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.line
        )
    }
}
