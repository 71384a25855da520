//! Barcode scanners and the containers they have queued up.

use std::fmt;

use im::Vector;
use sortline_foundation::{Result, Timestamp, TrackedModel};
use sortline_history::{HistoryTracker, Tracked, TrackerConfig, Transition};

use crate::container::Container;
use crate::kinds::ScannerName;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Model
// =============================================================================

/// A scanner's complete state at an instant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScannerModel {
    name: ScannerName,
    scanned_containers: Vector<Container>,
}

impl ScannerModel {
    /// Creates a scanner that has already seen `containers`, oldest first.
    #[must_use]
    pub fn new(name: ScannerName, containers: impl IntoIterator<Item = Container>) -> Self {
        Self {
            name,
            scanned_containers: containers.into_iter().collect(),
        }
    }

    /// Returns the scanner's name.
    #[must_use]
    pub const fn name(&self) -> ScannerName {
        self.name
    }

    /// Returns every container scanned so far, oldest first.
    #[must_use]
    pub fn scanned_containers(&self) -> &Vector<Container> {
        &self.scanned_containers
    }

    /// Returns a copy with a different name.
    #[must_use]
    pub fn with_name(self, name: ScannerName) -> Self {
        Self { name, ..self }
    }

    /// Returns a copy with a different container queue.
    #[must_use]
    pub fn with_scanned_containers(self, scanned_containers: Vector<Container>) -> Self {
        Self {
            scanned_containers,
            ..self
        }
    }

    /// Returns a copy with `container` appended to the queue.
    #[must_use]
    pub fn with_container(mut self, container: Container) -> Self {
        self.scanned_containers.push_back(container);
        self
    }
}

/// Fields of [`ScannerModel`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScannerField {
    /// The scanner's name.
    Name,
    /// The queue of scanned containers.
    ScannedContainers,
}

impl fmt::Display for ScannerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::ScannedContainers => f.write_str("scanned_containers"),
        }
    }
}

/// A value of one [`ScannerField`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScannerValue {
    /// See [`ScannerField::Name`].
    Name(ScannerName),
    /// See [`ScannerField::ScannedContainers`].
    ScannedContainers(Vector<Container>),
}

impl TrackedModel for ScannerModel {
    type Field = ScannerField;
    type Value = ScannerValue;

    const FIELDS: &'static [ScannerField] = &[ScannerField::Name, ScannerField::ScannedContainers];

    fn get(&self, field: ScannerField) -> ScannerValue {
        match field {
            ScannerField::Name => ScannerValue::Name(self.name),
            ScannerField::ScannedContainers => {
                ScannerValue::ScannedContainers(self.scanned_containers.clone())
            }
        }
    }

    fn with_value(self, value: ScannerValue) -> Self {
        match value {
            ScannerValue::Name(name) => self.with_name(name),
            ScannerValue::ScannedContainers(containers) => self.with_scanned_containers(containers),
        }
    }

    fn field_of(value: &ScannerValue) -> ScannerField {
        match value {
            ScannerValue::Name(_) => ScannerField::Name,
            ScannerValue::ScannedContainers(_) => ScannerField::ScannedContainers,
        }
    }
}

// =============================================================================
// Tracked Scanner
// =============================================================================

/// A scanner whose every state change is recorded.
#[derive(Debug, Default)]
pub struct TrackedScanner {
    tracker: HistoryTracker<ScannerModel>,
}

impl TrackedScanner {
    /// Creates a scanner at `created` that has already seen `containers`.
    #[must_use]
    pub fn new(
        created: Timestamp,
        name: ScannerName,
        containers: impl IntoIterator<Item = Container>,
    ) -> Self {
        Self::from_model(
            created,
            ScannerModel::new(name, containers),
            TrackerConfig::default(),
        )
    }

    /// Creates a scanner at `created` from a full model.
    #[must_use]
    pub fn from_model(created: Timestamp, model: ScannerModel, config: TrackerConfig) -> Self {
        Self {
            tracker: HistoryTracker::created(created, model, config),
        }
    }

    /// Creates a scanner with no state; every read fails until a model is set.
    #[must_use]
    pub fn uninitialized(config: TrackerConfig) -> Self {
        Self {
            tracker: HistoryTracker::with_config(config),
        }
    }

    /// Returns the scanner's name.
    pub fn name(&self) -> Result<ScannerName> {
        Ok(self.tracker.model()?.name())
    }

    /// Returns every container scanned so far, oldest first.
    pub fn scanned_containers(&self) -> Result<&Vector<Container>> {
        Ok(self.tracker.model()?.scanned_containers())
    }

    /// Returns the most recently scanned container.
    pub fn last_container(&self) -> Result<Option<&Container>> {
        Ok(self.tracker.model()?.scanned_containers().last())
    }

    /// Renames the scanner.
    pub fn set_name(&mut self, name: ScannerName) -> Result<Transition> {
        self.tracker
            .update_model_with(|m| m.clone().with_name(name))
    }

    /// Replaces the container queue.
    pub fn set_scanned_containers(&mut self, containers: Vector<Container>) -> Result<Transition> {
        self.tracker
            .update_model_with(|m| m.clone().with_scanned_containers(containers))
    }

    /// Appends a newly scanned container to the queue.
    pub fn queue_container(&mut self, container: Container) -> Result<Transition> {
        self.tracker
            .update_model_with(|m| m.clone().with_container(container))
    }
}

impl Tracked for TrackedScanner {
    type Model = ScannerModel;

    fn tracker(&self) -> &HistoryTracker<ScannerModel> {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut HistoryTracker<ScannerModel> {
        &mut self.tracker
    }
}
