//! Per-mutation change records.

use std::collections::BTreeMap;

use sortline_foundation::{Timestamp, TrackedModel, diff_models, populated_fields};

/// What changed at one timestamp: field name to new value.
///
/// Deltas are produced by [`HistoryTracker`](crate::HistoryTracker) only and
/// never change after being recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryDelta<M: TrackedModel> {
    timestamp: Timestamp,
    changes: BTreeMap<M::Field, M::Value>,
}

impl<M: TrackedModel> HistoryDelta<M> {
    /// The first delta of an entity: every field holding a non-default value.
    pub(crate) fn initial(timestamp: Timestamp, model: &M) -> Self {
        Self {
            timestamp,
            changes: populated_fields(model).into_iter().collect(),
        }
    }

    /// The fields of `new` that differ from `old`.
    pub(crate) fn between(timestamp: Timestamp, old: &M, new: &M) -> Self {
        Self {
            timestamp,
            changes: diff_models(old, new)
                .into_iter()
                .map(|change| (change.field, change.new))
                .collect(),
        }
    }

    /// Returns the timestamp the change is attributed to.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Returns the new value of `field`, if it changed.
    #[must_use]
    pub fn get(&self, field: M::Field) -> Option<&M::Value> {
        self.changes.get(&field)
    }

    /// Returns true if `field` changed.
    #[must_use]
    pub fn contains(&self, field: M::Field) -> bool {
        self.changes.contains_key(&field)
    }

    /// Returns the changed fields in declaration order.
    pub fn changed_fields(&self) -> impl Iterator<Item = M::Field> + '_ {
        self.changes.keys().copied()
    }

    /// Returns the changed fields with their new values.
    pub fn iter(&self) -> impl Iterator<Item = (M::Field, &M::Value)> + '_ {
        self.changes.iter().map(|(field, value)| (*field, value))
    }

    /// Returns the number of changed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if no field changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Replays this delta onto `model`.
    #[must_use]
    pub fn apply_to(&self, model: M) -> M {
        self.changes
            .values()
            .cloned()
            .fold(model, M::with_value)
    }
}
