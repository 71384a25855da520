//! Anything backed by a [`HistoryTracker`], and the timestamp scope that
//! attributes its mutations.

use std::ops::{Deref, DerefMut};

use sortline_foundation::{Result, Timestamp, TrackedModel};

use crate::observer::{ModelChange, SubscriptionId};
use crate::tracker::HistoryTracker;

/// A value whose state history lives in a [`HistoryTracker`].
///
/// Device entities and subsystem aggregates implement this to share the
/// scoping, query, and subscription surface of the tracker they wrap.
pub trait Tracked {
    /// The tracked model type.
    type Model: TrackedModel;

    /// Returns the backing tracker.
    fn tracker(&self) -> &HistoryTracker<Self::Model>;

    /// Returns the backing tracker mutably.
    fn tracker_mut(&mut self) -> &mut HistoryTracker<Self::Model>;

    /// Opens a scope attributing every mutation made through it to `timestamp`.
    ///
    /// The context is cleared when the scope is dropped, including on early
    /// return through `?`.
    fn with_timestamp(&mut self, timestamp: Timestamp) -> TimestampScope<'_, Self>
    where
        Self: Sized,
    {
        self.tracker_mut().open_context(timestamp);
        TimestampScope { target: self }
    }

    /// Returns the live model.
    fn model(&self) -> Result<&Self::Model> {
        self.tracker().model()
    }

    /// Reconstructs the model as it was at `at`.
    fn snapshot(&self, at: Timestamp) -> Result<Self::Model> {
        self.tracker().snapshot(at)
    }

    /// Registers a change callback.
    fn subscribe(
        &mut self,
        callback: impl FnMut(&ModelChange<'_, Self::Model>) + 'static,
    ) -> SubscriptionId
    where
        Self: Sized,
    {
        self.tracker_mut().subscribe(callback)
    }

    /// Removes a change callback.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.tracker_mut().unsubscribe(id)
    }
}

impl<M: TrackedModel> Tracked for HistoryTracker<M> {
    type Model = M;

    fn tracker(&self) -> &HistoryTracker<M> {
        self
    }

    fn tracker_mut(&mut self) -> &mut HistoryTracker<M> {
        self
    }
}

/// Guard returned by [`Tracked::with_timestamp`].
///
/// Dereferences to the scoped value, so its typed setters are called through
/// the guard. Holding the guard borrows the value mutably, which rules out a
/// second, nested scope on the same value.
#[derive(Debug)]
pub struct TimestampScope<'a, T: Tracked> {
    target: &'a mut T,
}

impl<T: Tracked> TimestampScope<'_, T> {
    /// Returns the timestamp this scope attributes mutations to.
    #[must_use]
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.target.tracker().context()
    }
}

impl<T: Tracked> Deref for TimestampScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: Tracked> DerefMut for TimestampScope<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: Tracked> Drop for TimestampScope<'_, T> {
    fn drop(&mut self) {
        self.target.tracker_mut().close_context();
    }
}
