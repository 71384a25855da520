//! Integration tests for LogClock
//!
//! A clock turns a log line's time of day into a Timestamp on the file's date.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use sortline_foundation::LogClock;

fn time(h: u32, m: u32, s: u32, ms: u32) -> NaiveTime {
    NaiveTime::from_hms_milli_opt(h, m, s, ms).unwrap()
}

#[test]
fn clock_from_last_write_stamps_lines_on_that_date() {
    let last_write = DateTime::parse_from_rfc3339("2024-06-01T18:45:00-05:00").unwrap();
    let clock = LogClock::from_last_write(last_write);

    let ts = clock.timestamp(time(6, 15, 0, 250), 3).unwrap();

    assert_eq!(ts.line(), 3);
    assert_eq!(ts.time_of_day(), time(6, 15, 0, 250));
    assert_eq!(
        ts.wall_clock().date_naive(),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    );
    assert_eq!(
        ts.wall_clock().offset(),
        &FixedOffset::west_opt(5 * 3600).unwrap()
    );
}

#[test]
fn later_lines_in_a_file_order_later() {
    let clock = LogClock::new(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        FixedOffset::east_opt(0).unwrap(),
    );
    let lines = [
        (1, time(6, 0, 0, 0)),
        (2, time(6, 0, 0, 0)),
        (3, time(6, 0, 0, 1)),
        (4, time(7, 0, 0, 0)),
    ];
    let stamps: Vec<_> = lines
        .iter()
        .map(|&(line, t)| clock.timestamp(t, line).unwrap())
        .collect();

    assert!(stamps.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn at_line_keeps_the_instant() {
    let clock = LogClock::new(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        FixedOffset::east_opt(0).unwrap(),
    );
    let ts = clock.timestamp(time(6, 0, 0, 0), 1).unwrap();
    let moved = ts.at_line(8);

    assert_eq!(moved.wall_clock(), ts.wall_clock());
    assert_eq!(moved.line(), 8);
    assert!(moved > ts);
}
