//! Integration tests for point-in-time queries
//!
//! Checkpoint-assisted replay must agree with replay from genesis.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use sortline_history::{HistoryTracker, TrackerConfig, Transition};

use crate::fixtures::{Belt, BeltField, ts};

fn tracker(frequency: usize) -> HistoryTracker<Belt> {
    let config =
        TrackerConfig::new().with_snapshot_frequency(NonZeroUsize::new(frequency).unwrap());
    HistoryTracker::created(ts(0), Belt::running_at(10), config)
}

// =============================================================================
// Checkpoint Cadence
// =============================================================================

#[test]
fn five_advances_at_frequency_two_leave_four_checkpoints() {
    let mut belt = tracker(2);
    for n in 1..=5 {
        belt.update_with_timestamp(ts(n), Belt::running_at(10 + n));
    }

    let at: Vec<_> = belt.checkpoints().iter().map(|c| c.timestamp()).collect();
    assert_eq!(at, vec![ts(0), ts(1), ts(3), ts(5)]);
    assert_eq!(belt.deltas().len(), 6);
}

#[test]
fn steady_state_checkpoints_hold_the_new_model() {
    let mut belt = tracker(2);
    belt.update_with_timestamp(ts(1), Belt::running_at(55));

    let checkpoint = belt.checkpoints().last().unwrap();
    assert_eq!(checkpoint.timestamp(), ts(1));
    assert_eq!(checkpoint.model().speed, 55);
    assert_eq!(checkpoint.delta_count(), 2);
}

#[test]
fn no_op_updates_record_nothing() {
    let mut belt = tracker(1);
    let outcome = belt.update_with_timestamp(ts(1), Belt::running_at(10));

    assert_eq!(outcome, Transition::Unchanged);
    assert_eq!(belt.deltas().len(), 1);
    assert_eq!(belt.checkpoints().len(), 1);
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn snapshot_between_checkpoints_replays_deltas() {
    let mut belt = tracker(16);
    belt.update_with_timestamp(ts(1), Belt::running_at(20));
    belt.update_with_timestamp(ts(2), Belt::running_at(30));
    belt.update_with_timestamp(ts(3), Belt::default());

    assert_eq!(belt.checkpoints().len(), 1);
    assert_eq!(belt.snapshot(ts(0)).unwrap().speed, 10);
    assert_eq!(belt.snapshot(ts(2)).unwrap().speed, 30);
    assert_eq!(belt.snapshot(ts(3)).unwrap(), Belt::default());
    assert_eq!(belt.snapshot(ts(99)).unwrap(), Belt::default());
}

#[test]
fn snapshot_before_creation_fails() {
    let belt = HistoryTracker::created(ts(5), Belt::running_at(1), TrackerConfig::default());
    let err = belt.snapshot(ts(4)).unwrap_err();
    assert!(err.is_no_checkpoint());
}

#[test]
fn snapshot_of_uninitialized_tracker_fails() {
    let belt: HistoryTracker<Belt> = HistoryTracker::new();
    assert!(belt.snapshot(ts(4)).unwrap_err().is_no_checkpoint());
    assert!(belt.model().unwrap_err().is_uninitialized());
}

#[test]
fn deltas_name_only_changed_fields() {
    let mut belt = tracker(2);
    let faster = Belt {
        speed: 40,
        ..Belt::running_at(10)
    };
    belt.update_with_timestamp(ts(1), faster);

    let delta = belt.deltas().last().unwrap();
    assert_eq!(delta.changed_fields().collect::<Vec<_>>(), vec![BeltField::Speed]);
}

#[test]
fn initial_delta_names_non_default_fields() {
    let belt = HistoryTracker::created(
        ts(0),
        Belt {
            speed: 3,
            ..Belt::default()
        },
        TrackerConfig::default(),
    );

    let initial = &belt.deltas()[0];
    assert_eq!(initial.changed_fields().collect::<Vec<_>>(), vec![BeltField::Speed]);
}

// =============================================================================
// Properties
// =============================================================================

fn belt_strategy() -> impl Strategy<Value = Belt> {
    (0u32..4, any::<bool>(), prop::sample::select(vec!["", "a", "b"])).prop_map(
        |(speed, running, label)| Belt {
            speed,
            running,
            label: label.to_string(),
        },
    )
}

proptest! {
    #[test]
    fn checkpointed_and_genesis_replay_agree(
        models in prop::collection::vec(belt_strategy(), 1..30),
        frequency in 1usize..6,
    ) {
        let mut belt = tracker(frequency);
        for (n, model) in models.into_iter().enumerate() {
            let n = u32::try_from(n).unwrap() + 1;
            belt.update_with_timestamp(ts(n), model);
        }

        for n in 0..32 {
            prop_assert_eq!(
                belt.snapshot(ts(n)).unwrap(),
                belt.replay_from_genesis(ts(n)).unwrap()
            );
        }
    }
}
