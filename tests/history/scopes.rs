//! Integration tests for timestamp scopes
//!
//! Mutations are attributed to the scope's timestamp and fail without one.

use sortline_history::{HistoryTracker, Tracked, TrackerConfig, Transition};

use crate::fixtures::{Belt, ts};

#[test]
fn update_without_scope_fails_on_fresh_tracker() {
    let mut belt: HistoryTracker<Belt> = HistoryTracker::new();
    let err = belt.update_model(Belt::running_at(1)).unwrap_err();

    assert!(err.is_uninitialized_context());
    assert!(!belt.is_initialized());
}

#[test]
fn first_update_in_scope_initializes() {
    let mut belt: HistoryTracker<Belt> = HistoryTracker::with_config(TrackerConfig::dense());
    let outcome = belt
        .with_timestamp(ts(0))
        .update_model(Belt::running_at(5))
        .unwrap();

    assert_eq!(outcome, Transition::Initialized);
    assert!(belt.is_initialized());
    assert_eq!(belt.creation_timestamp(), Some(ts(0)));
    assert_eq!(belt.checkpoints().len(), 1);
}

#[test]
fn derived_update_on_fresh_tracker_reports_missing_model() {
    let mut belt: HistoryTracker<Belt> = HistoryTracker::new();
    let err = belt
        .with_timestamp(ts(0))
        .update_model_with(|b| Belt {
            speed: b.speed + 1,
            ..b.clone()
        })
        .unwrap_err();

    assert!(err.is_uninitialized());
}

#[test]
fn scope_attributes_every_mutation_inside_it() {
    let mut belt = HistoryTracker::created(ts(0), Belt::default(), TrackerConfig::default());
    {
        let mut scope = belt.with_timestamp(ts(7));
        scope.update_model(Belt::running_at(1)).unwrap();
        scope.update_model(Belt::running_at(2)).unwrap();
        assert_eq!(scope.timestamp(), Some(ts(7)));
    }

    let stamps: Vec<_> = belt.deltas()[1..].iter().map(|d| d.timestamp()).collect();
    assert_eq!(stamps, vec![ts(7), ts(7)]);
    assert_eq!(belt.context(), None);
    assert_eq!(belt.snapshot(ts(7)).unwrap().speed, 2);
}

#[test]
fn scope_closes_on_early_return() {
    fn fails_inside_scope(belt: &mut HistoryTracker<Belt>) -> sortline_foundation::Result<()> {
        let mut scope = belt.with_timestamp(ts(3));
        scope.update_model(Belt::running_at(9))?;
        Err(sortline_foundation::Error::uninitialized("belt"))
    }

    let mut belt = HistoryTracker::created(ts(0), Belt::default(), TrackerConfig::default());
    assert!(fails_inside_scope(&mut belt).is_err());
    assert_eq!(belt.context(), None);
    assert!(belt.update_model(Belt::default()).unwrap_err().is_uninitialized_context());
}

#[test]
fn explicit_timestamp_updates_need_no_scope() {
    let mut belt = HistoryTracker::created(ts(0), Belt::default(), TrackerConfig::default());
    belt.update_with_timestamp_fn(ts(1), |b| Belt {
        running: true,
        ..b.clone()
    })
    .unwrap();

    assert!(belt.model().unwrap().running);
    assert_eq!(belt.latest_timestamp(), Some(ts(1)));
}
