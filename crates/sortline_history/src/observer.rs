//! Change notifications.
//!
//! Every accepted, model-changing mutation is announced to subscribers
//! synchronously, in registration order, before the mutating call returns.

use std::fmt;

use sortline_foundation::{FieldChange, Timestamp, TrackedModel, diff_models};
use tracing::trace;

/// A model transition announced to subscribers.
#[derive(Debug)]
pub struct ModelChange<'a, M: TrackedModel> {
    /// The model before the mutation.
    pub old: &'a M,
    /// The model after the mutation.
    pub new: &'a M,
    /// The timestamp the mutation is attributed to.
    pub timestamp: Timestamp,
}

impl<M: TrackedModel> ModelChange<'_, M> {
    /// Returns the fields that differ between the old and new model.
    #[must_use]
    pub fn changes(&self) -> Vec<FieldChange<M>> {
        diff_models(self.old, self.new)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

type Callback<M> = Box<dyn FnMut(&ModelChange<'_, M>)>;

/// Ordered list of change subscribers.
pub struct Observers<M: TrackedModel> {
    subscribers: Vec<(SubscriptionId, Callback<M>)>,
    next_id: u64,
}

impl<M: TrackedModel> Observers<M> {
    /// Creates an empty subscriber list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a callback; it runs after every subsequent change.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&ModelChange<'_, M>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns true if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Runs every callback in registration order.
    pub fn notify(&mut self, change: &ModelChange<'_, M>) {
        trace!(
            timestamp = %change.timestamp,
            subscribers = self.subscribers.len(),
            "notifying model change"
        );
        for (_, callback) in &mut self.subscribers {
            callback(change);
        }
    }
}

impl<M: TrackedModel> Default for Observers<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TrackedModel> fmt::Debug for Observers<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
