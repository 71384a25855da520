//! Integration tests for change notification
//!
//! Subscribers run synchronously, in registration order, once per advance.

use std::cell::RefCell;
use std::rc::Rc;

use sortline_history::{HistoryTracker, Tracked, TrackerConfig};

use crate::fixtures::{Belt, BeltField, ts};

#[test]
fn subscribers_run_in_registration_order() {
    let mut belt = HistoryTracker::created(ts(0), Belt::default(), TrackerConfig::default());
    let calls = Rc::new(RefCell::new(Vec::new()));
    for name in ["first", "second", "third"] {
        let calls = Rc::clone(&calls);
        belt.subscribe(move |_| calls.borrow_mut().push(name));
    }

    belt.update_with_timestamp(ts(1), Belt::running_at(4));

    assert_eq!(*calls.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn notification_carries_old_new_and_timestamp() {
    let mut belt = HistoryTracker::created(ts(0), Belt::running_at(4), TrackerConfig::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    belt.subscribe(move |change| {
        let fields: Vec<_> = change.changes().iter().map(|c| c.field).collect();
        sink.borrow_mut()
            .push((change.old.speed, change.new.speed, change.timestamp, fields));
    });

    belt.with_timestamp(ts(2))
        .update_model(Belt::running_at(8))
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![(4, 8, ts(2), vec![BeltField::Speed])]
    );
}

#[test]
fn no_notification_for_initialization_or_no_ops() {
    let mut belt: HistoryTracker<Belt> = HistoryTracker::new();
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    belt.subscribe(move |_| *counter.borrow_mut() += 1);

    belt.update_with_timestamp(ts(0), Belt::running_at(1));
    belt.update_with_timestamp(ts(1), Belt::running_at(1));
    assert_eq!(*count.borrow(), 0);

    belt.update_with_timestamp(ts(2), Belt::running_at(2));
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn unsubscribed_callbacks_stop() {
    let mut belt = HistoryTracker::created(ts(0), Belt::default(), TrackerConfig::default());
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let id = belt.subscribe(move |_| *counter.borrow_mut() += 1);

    belt.update_with_timestamp(ts(1), Belt::running_at(1));
    assert!(belt.unsubscribe(id));
    assert!(!belt.unsubscribe(id));
    belt.update_with_timestamp(ts(2), Belt::running_at(2));

    assert_eq!(*count.borrow(), 1);
    assert_eq!(belt.subscriber_count(), 0);
}

#[test]
fn subscribers_see_the_recorded_delta() {
    let mut belt = HistoryTracker::created(ts(0), Belt::default(), TrackerConfig::default());
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    belt.subscribe(move |change| *sink.borrow_mut() = Some(change.new.clone()));

    belt.update_with_timestamp(ts(1), Belt::running_at(6));

    assert_eq!(seen.borrow().as_ref(), Some(belt.model().unwrap()));
}
