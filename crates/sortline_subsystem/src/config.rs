//! Configuration for subsystem aggregates.

use sortline_history::TrackerConfig;

/// History settings for a subsystem and the devices it creates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubsystemConfig {
    /// Settings for the aggregate's own history.
    pub tracker: TrackerConfig,
    /// Settings for devices the subsystem creates itself.
    pub device_tracker: TrackerConfig,
}

impl SubsystemConfig {
    /// Creates a config using default history settings everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the aggregate's history settings.
    #[must_use]
    pub const fn with_tracker(mut self, tracker: TrackerConfig) -> Self {
        self.tracker = tracker;
        self
    }

    /// Sets the history settings for devices created by the subsystem.
    #[must_use]
    pub const fn with_device_tracker(mut self, device_tracker: TrackerConfig) -> Self {
        self.device_tracker = device_tracker;
        self
    }
}
