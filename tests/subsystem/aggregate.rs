//! Integration tests for the inbound aggregate
//!
//! The aggregate's history must agree with its devices' histories at every
//! point in time.

use std::cell::RefCell;
use std::net::{IpAddr, Ipv4Addr};
use std::rc::Rc;

use chrono::{FixedOffset, TimeZone};
use proptest::prelude::*;
use sortline_devices::{
    Container, PrinterModel, PrinterStatus, ScannerName, TrackedPrinter, TrackedScanner,
};
use sortline_foundation::Timestamp;
use sortline_history::{Tracked, TrackerConfig};
use sortline_subsystem::{InboundField, SubsystemConfig, TrackedInboundSubsystem};

use crate::init_tracing;

fn ts(n: u32) -> Timestamp {
    let offset = FixedOffset::east_opt(0).unwrap();
    let base = offset.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap();
    Timestamp::new(base + chrono::Duration::seconds(i64::from(n)), n + 1)
}

fn printer(id: u32) -> TrackedPrinter {
    let last_octet = u8::try_from(37 + id).unwrap();
    let model = PrinterModel::new(id, IpAddr::V4(Ipv4Addr::new(172, 24, 18, last_octet)))
        .with_status(Some(PrinterStatus::Off));
    TrackedPrinter::from_model(ts(0), model, TrackerConfig::default())
}

fn two_printers(config: SubsystemConfig) -> TrackedInboundSubsystem {
    TrackedInboundSubsystem::new(ts(0), [printer(1), printer(2)], [], config).unwrap()
}

fn status(subsystem: &TrackedInboundSubsystem, at: u32, id: u32) -> Option<PrinterStatus> {
    subsystem
        .snapshot(ts(at))
        .unwrap()
        .printer(id)
        .and_then(PrinterModel::status)
}

// =============================================================================
// Consistency
// =============================================================================

#[test]
fn two_children_two_aggregate_deltas() {
    init_tracing();
    let mut subsystem = two_printers(SubsystemConfig::default());

    subsystem
        .with_printer(1, |p| p.with_timestamp(ts(1)).set_status(PrinterStatus::On))
        .unwrap();
    subsystem
        .with_printer(2, |p| p.with_timestamp(ts(2)).set_status(PrinterStatus::On))
        .unwrap();

    let stamps: Vec<_> = subsystem.tracker().deltas()[1..]
        .iter()
        .map(|d| d.timestamp())
        .collect();
    assert_eq!(stamps, vec![ts(1), ts(2)]);

    assert_eq!(status(&subsystem, 1, 1), Some(PrinterStatus::On));
    assert_eq!(status(&subsystem, 1, 2), Some(PrinterStatus::Off));
    assert_eq!(status(&subsystem, 2, 2), Some(PrinterStatus::On));
}

#[test]
fn aggregate_snapshots_match_device_snapshots() {
    let config = SubsystemConfig::default().with_tracker(TrackerConfig::sparse());
    let mut subsystem = two_printers(config);
    let toggles = [(1, true), (2, true), (1, false), (1, true), (2, false)];
    for (n, &(id, enabled)) in toggles.iter().enumerate() {
        let at = ts(u32::try_from(n).unwrap() + 1);
        subsystem
            .with_printer(id, |p| {
                p.with_timestamp(at)
                    .set_status(PrinterStatus::from_enabled(enabled))
            })
            .unwrap();
    }

    for n in 0..8 {
        let aggregate = subsystem.snapshot(ts(n)).unwrap();
        for id in subsystem.printer_ids() {
            let device = subsystem.printer(id).unwrap().snapshot(ts(n)).unwrap();
            assert_eq!(aggregate.printer(id), Some(&device), "printer {id} at {n}");
        }
    }
}

#[test]
fn external_observers_see_aggregate_changes() {
    let mut subsystem = TrackedInboundSubsystem::new(
        ts(0),
        [printer(1)],
        [TrackedScanner::new(ts(0), ScannerName::Receiving, [])],
        SubsystemConfig::default(),
    )
    .unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let id = subsystem.subscribe(move |change| {
        for field in change.changes() {
            sink.borrow_mut().push((change.timestamp, field.field));
        }
    });

    subsystem
        .with_scanner(ScannerName::Receiving, |s| {
            s.with_timestamp(ts(3))
                .queue_container(Container::from_barcodes(["R7"]))
        })
        .unwrap();
    subsystem
        .with_printer(1, |p| p.with_timestamp(ts(4)).set_status(PrinterStatus::On))
        .unwrap();
    assert!(subsystem.unsubscribe(id));
    subsystem
        .with_printer(1, |p| p.with_timestamp(ts(5)).set_status(PrinterStatus::Off))
        .unwrap();

    assert_eq!(
        *log.borrow(),
        vec![(ts(3), InboundField::Scanners), (ts(4), InboundField::Printers)]
    );
}

#[test]
fn device_set_changes_are_timestamped() {
    let mut subsystem = two_printers(SubsystemConfig::default());
    subsystem.add_printer(ts(2), printer(3)).unwrap();
    subsystem.remove_printer(ts(4), 1).unwrap();

    let count = |n| subsystem.snapshot(ts(n)).unwrap().printers().len();
    assert_eq!((count(1), count(2), count(3), count(4)), (2, 3, 3, 2));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn aggregate_history_agrees_with_devices(
        toggles in prop::collection::vec((1u32..=3, any::<bool>()), 0..24),
        frequency in 1usize..5,
    ) {
        let tracker = TrackerConfig::new()
            .with_snapshot_frequency(std::num::NonZeroUsize::new(frequency).unwrap());
        let mut subsystem = TrackedInboundSubsystem::new(
            ts(0),
            [printer(1), printer(2), printer(3)],
            [],
            SubsystemConfig::default().with_tracker(tracker),
        )
        .unwrap();

        for (n, (id, enabled)) in toggles.iter().copied().enumerate() {
            let at = ts(u32::try_from(n).unwrap() + 1);
            subsystem
                .with_printer(id, |p| {
                    p.with_timestamp(at)
                        .set_status(PrinterStatus::from_enabled(enabled))
                })
                .unwrap();
        }

        for n in 0..26 {
            let aggregate = subsystem.snapshot(ts(n)).unwrap();
            prop_assert_eq!(&aggregate, &subsystem.tracker().replay_from_genesis(ts(n)).unwrap());
            for id in 1..=3 {
                let device = subsystem.printer(id).unwrap().snapshot(ts(n)).unwrap();
                prop_assert_eq!(aggregate.printer(id), Some(&device));
            }
        }
    }
}
