//! Timestamp helper shared by this crate's unit tests.

use chrono::{FixedOffset, TimeZone};
use sortline_foundation::Timestamp;

/// Timestamp `n` seconds after a fixed base, attributed to line `n`.
pub fn ts(n: u32) -> Timestamp {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let base = offset.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap();
    Timestamp::new(base + chrono::Duration::seconds(i64::from(n)), n)
}
