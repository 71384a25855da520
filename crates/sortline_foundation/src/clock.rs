//! Building timestamps for the events of one log file.
//!
//! Equipment log lines only carry a time of day. The calendar date and UTC
//! offset come from the file itself (its last-write time), so each file gets
//! one [`LogClock`] that stamps every event read from it.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

use crate::error::{Error, Result};
use crate::timestamp::Timestamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-file timestamp factory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogClock {
    date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(with = "offset_seconds"))]
    offset: FixedOffset,
}

impl LogClock {
    /// Creates a clock for a file written on `date` in the given UTC offset.
    #[must_use]
    pub const fn new(date: NaiveDate, offset: FixedOffset) -> Self {
        Self { date, offset }
    }

    /// Creates a clock from the file's last-write time.
    #[must_use]
    pub fn from_last_write(last_write: DateTime<FixedOffset>) -> Self {
        Self {
            date: last_write.date_naive(),
            offset: *last_write.offset(),
        }
    }

    /// Returns the calendar date events are attributed to.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the UTC offset events are attributed to.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Stamps an event logged at `time_of_day` on the 1-based source `line`.
    pub fn timestamp(&self, time_of_day: NaiveTime, line: u32) -> Result<Timestamp> {
        let wall_clock = self
            .date
            .and_time(time_of_day)
            .and_local_timezone(self.offset)
            .single()
            .ok_or_else(|| {
                Error::invalid_time(format!(
                    "{} {time_of_day} has no single instant at offset {}",
                    self.date, self.offset
                ))
            })?;
        Ok(Timestamp::new(wall_clock, line))
    }
}

/// Serializes a [`FixedOffset`] as seconds east of UTC.
#[cfg(feature = "serde")]
mod offset_seconds {
    use chrono::FixedOffset;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(offset: &FixedOffset, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(offset.local_minus_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<FixedOffset, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = i32::deserialize(deserializer)?;
        FixedOffset::east_opt(seconds)
            .ok_or_else(|| D::Error::custom(format!("UTC offset out of range: {seconds}s")))
    }
}
