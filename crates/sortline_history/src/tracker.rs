//! The history tracker: one live model, its delta log, and its checkpoints.
//!
//! # Recording
//!
//! The first model ever set produces a checkpoint and a delta holding every
//! populated field. After that, each model-changing update appends a delta with
//! exactly the fields that differ, notifies subscribers, and appends a new
//! checkpoint whenever the delta count reaches a multiple of the configured
//! snapshot frequency. Updates to an equal model are no-ops.
//!
//! # Querying
//!
//! [`HistoryTracker::snapshot`] finds the last checkpoint at or before the
//! requested timestamp and replays the deltas recorded after it, so a query
//! replays at most one checkpoint interval.
//!
//! # Timestamps
//!
//! Mutations are attributed to the timestamp of the enclosing scope opened
//! with [`Tracked::with_timestamp`](crate::Tracked::with_timestamp). The scope
//! borrows its target mutably, so scopes on one tracker cannot nest.

use sortline_foundation::{Error, Result, Timestamp, TrackedModel};
use tracing::{debug, trace, warn};

use crate::checkpoint::Checkpoint;
use crate::config::TrackerConfig;
use crate::delta::HistoryDelta;
use crate::observer::{ModelChange, Observers, SubscriptionId};

/// The outcome of one update call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The new model equals the current one; nothing was recorded.
    Unchanged,
    /// The first model was set; a checkpoint and an initial delta were recorded.
    Initialized,
    /// A delta was recorded and subscribers were notified.
    Advanced {
        /// Whether a checkpoint was appended as well.
        checkpointed: bool,
    },
}

impl Transition {
    /// Returns true if anything was recorded.
    #[must_use]
    pub const fn is_recorded(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Owns one entity's live model and full history.
#[derive(Debug)]
pub struct HistoryTracker<M: TrackedModel> {
    model: Option<M>,
    deltas: Vec<HistoryDelta<M>>,
    checkpoints: Vec<Checkpoint<M>>,
    config: TrackerConfig,
    context: Option<Timestamp>,
    observers: Observers<M>,
}

impl<M: TrackedModel> Default for HistoryTracker<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TrackedModel> HistoryTracker<M> {
    /// Creates an uninitialized tracker with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Creates an uninitialized tracker with custom configuration.
    #[must_use]
    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            model: None,
            deltas: Vec::new(),
            checkpoints: Vec::new(),
            config,
            context: None,
            observers: Observers::new(),
        }
    }

    /// Creates a tracker whose history starts with `model` at `created`.
    #[must_use]
    pub fn created(created: Timestamp, model: M, config: TrackerConfig) -> Self {
        let mut tracker = Self::with_config(config);
        tracker.record(created, model);
        tracker
    }

    // -------------------------------------------------------------------------
    // Live state
    // -------------------------------------------------------------------------

    /// Returns the live model.
    pub fn model(&self) -> Result<&M> {
        self.model
            .as_ref()
            .ok_or_else(|| Error::uninitialized("tracked model"))
    }

    /// Returns true once a model has been set.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.model.is_some()
    }

    /// Returns the timestamp the next mutation will be attributed to, if any.
    #[must_use]
    pub const fn context(&self) -> Option<Timestamp> {
        self.context
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Returns the checkpoint cadence.
    #[must_use]
    pub const fn snapshot_frequency(&self) -> usize {
        self.config.snapshot_frequency.get()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Replaces the live model, attributing the change to the current scope's timestamp.
    ///
    /// # Errors
    ///
    /// Returns `UninitializedContext` outside of a timestamp scope.
    pub fn update_model(&mut self, model: M) -> Result<Transition> {
        let timestamp = self.context.ok_or_else(Error::uninitialized_context)?;
        Ok(self.record(timestamp, model))
    }

    /// Derives a new live model from the current one.
    ///
    /// # Errors
    ///
    /// Returns `Uninitialized` if no model was ever set, and
    /// `UninitializedContext` outside of a timestamp scope.
    pub fn update_model_with(&mut self, update: impl FnOnce(&M) -> M) -> Result<Transition> {
        let model = update(self.model()?);
        self.update_model(model)
    }

    /// Replaces the live model at an explicit timestamp.
    pub fn update_with_timestamp(&mut self, timestamp: Timestamp, model: M) -> Transition {
        self.record(timestamp, model)
    }

    /// Derives a new live model from the current one at an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns `Uninitialized` if no model was ever set.
    pub fn update_with_timestamp_fn(
        &mut self,
        timestamp: Timestamp,
        update: impl FnOnce(&M) -> M,
    ) -> Result<Transition> {
        let model = update(self.model()?);
        Ok(self.record(timestamp, model))
    }

    pub(crate) fn open_context(&mut self, timestamp: Timestamp) {
        self.context = Some(timestamp);
    }

    pub(crate) fn close_context(&mut self) {
        self.context = None;
    }

    fn record(&mut self, timestamp: Timestamp, new: M) -> Transition {
        let Some(old) = self.model.take() else {
            debug!(%timestamp, "initializing tracked model");
            self.deltas.push(HistoryDelta::initial(timestamp, &new));
            self.checkpoints
                .push(Checkpoint::new(timestamp, new.clone(), self.deltas.len()));
            self.model = Some(new);
            return Transition::Initialized;
        };

        if old == new {
            self.model = Some(old);
            return Transition::Unchanged;
        }

        if let Some(latest) = self.latest_timestamp() {
            if timestamp < latest {
                warn!(%timestamp, %latest, "recording a change older than the latest delta");
            }
        }

        let delta = HistoryDelta::between(timestamp, &old, &new);
        trace!(%timestamp, fields = delta.len(), "recording delta");
        self.deltas.push(delta);

        let checkpointed = self.deltas.len() % self.snapshot_frequency() == 0;
        if checkpointed {
            debug!(%timestamp, deltas = self.deltas.len(), "recording checkpoint");
            self.checkpoints
                .push(Checkpoint::new(timestamp, new.clone(), self.deltas.len()));
        }

        let new: &M = self.model.insert(new);
        self.observers.notify(&ModelChange {
            old: &old,
            new,
            timestamp,
        });

        Transition::Advanced { checkpointed }
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Reconstructs the model as it was at `at`.
    ///
    /// Deltas are replayed in the order they were recorded, stopping at the
    /// first one later than `at`. After a change was recorded out of order
    /// (logged with a warning), a query between the two timestamps does not
    /// see the late change, and later queries see it applied on top of the
    /// earlier-recorded state.
    ///
    /// # Errors
    ///
    /// Returns `NoCheckpointFound` if `at` precedes the first checkpoint.
    pub fn snapshot(&self, at: Timestamp) -> Result<M> {
        let preceding = self.checkpoints.partition_point(|c| c.timestamp() <= at);
        let checkpoint = preceding
            .checked_sub(1)
            .map(|index| &self.checkpoints[index])
            .ok_or_else(|| Error::no_checkpoint(at, self.creation_timestamp()))?;

        Ok(self.deltas[checkpoint.delta_count()..]
            .iter()
            .take_while(|delta| delta.timestamp() <= at)
            .fold(checkpoint.model().clone(), |model, delta| delta.apply_to(model)))
    }

    /// Reconstructs the model at `at` by replaying every delta from the default model.
    ///
    /// Ignores checkpoints entirely; useful for auditing them. Out-of-order
    /// deltas are handled as in [`HistoryTracker::snapshot`].
    ///
    /// # Errors
    ///
    /// Returns `NoCheckpointFound` if `at` precedes the tracker's creation.
    pub fn replay_from_genesis(&self, at: Timestamp) -> Result<M> {
        match self.creation_timestamp() {
            Some(created) if created <= at => Ok(self
                .deltas
                .iter()
                .take_while(|delta| delta.timestamp() <= at)
                .fold(M::default(), |model, delta| delta.apply_to(model))),
            created => Err(Error::no_checkpoint(at, created)),
        }
    }

    /// Returns every recorded delta, oldest first.
    #[must_use]
    pub fn deltas(&self) -> &[HistoryDelta<M>] {
        &self.deltas
    }

    /// Returns every recorded checkpoint, oldest first.
    #[must_use]
    pub fn checkpoints(&self) -> &[Checkpoint<M>] {
        &self.checkpoints
    }

    /// Returns the timestamp of the first checkpoint.
    #[must_use]
    pub fn creation_timestamp(&self) -> Option<Timestamp> {
        self.checkpoints.first().map(Checkpoint::timestamp)
    }

    /// Returns the timestamp of the most recent delta.
    #[must_use]
    pub fn latest_timestamp(&self) -> Option<Timestamp> {
        self.deltas.last().map(HistoryDelta::timestamp)
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Registers a change callback.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&ModelChange<'_, M>) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Removes a change callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}
