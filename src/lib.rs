//! Sortline - Point-in-time state tracking for sortation line equipment logs
//!
//! This crate re-exports all layers of the Sortline system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: sortline_subsystem  — Subsystem aggregates, inbound event application
//! Layer 2: sortline_devices    — Tracked printers and scanners
//! Layer 1: sortline_history    — Deltas, checkpoints, timestamp scopes, observers
//! Layer 0: sortline_foundation — Core types (Timestamp, LogClock, Error, TrackedModel)
//! ```

pub use sortline_devices as devices;
pub use sortline_foundation as foundation;
pub use sortline_history as history;
pub use sortline_subsystem as subsystem;
