//! Full-state snapshots used as replay starting points.

use sortline_foundation::{Timestamp, TrackedModel};

/// A full model snapshot at a timestamp.
///
/// `delta_count` is the number of deltas already folded into `model`, so a
/// replay resumes at exactly the next recorded delta even when several deltas
/// share one timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint<M: TrackedModel> {
    timestamp: Timestamp,
    model: M,
    delta_count: usize,
}

impl<M: TrackedModel> Checkpoint<M> {
    pub(crate) fn new(timestamp: Timestamp, model: M, delta_count: usize) -> Self {
        Self {
            timestamp,
            model,
            delta_count,
        }
    }

    /// Returns the checkpoint's timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Returns the snapshotted model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns how many deltas the snapshot already includes.
    #[must_use]
    pub const fn delta_count(&self) -> usize {
        self.delta_count
    }
}
