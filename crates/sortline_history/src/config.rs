//! Configuration for history trackers.

use std::num::NonZeroUsize;

/// Default checkpoint cadence: one full snapshot every second delta.
pub const DEFAULT_SNAPSHOT_FREQUENCY: NonZeroUsize = NonZeroUsize::new(2).unwrap();

/// Configuration for a [`HistoryTracker`](crate::HistoryTracker).
///
/// Controls how often full checkpoints are taken. Point-in-time queries replay
/// at most `snapshot_frequency` deltas, at the cost of one stored model per
/// checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// A checkpoint is appended whenever the delta count reaches a multiple of this.
    pub snapshot_frequency: NonZeroUsize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            snapshot_frequency: DEFAULT_SNAPSHOT_FREQUENCY,
        }
    }
}

impl TrackerConfig {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that checkpoints after every delta.
    #[must_use]
    pub const fn dense() -> Self {
        Self {
            snapshot_frequency: NonZeroUsize::MIN,
        }
    }

    /// A configuration that checkpoints after every 16th delta.
    #[must_use]
    pub const fn sparse() -> Self {
        Self {
            snapshot_frequency: NonZeroUsize::new(16).unwrap(),
        }
    }

    /// Builder method to set the snapshot frequency.
    #[must_use]
    pub const fn with_snapshot_frequency(mut self, frequency: NonZeroUsize) -> Self {
        self.snapshot_frequency = frequency;
        self
    }
}
