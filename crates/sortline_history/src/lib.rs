//! Delta and checkpoint history with point-in-time queries for Sortline.
//!
//! This crate provides:
//! - [`HistoryTracker`] - One live model plus its delta and checkpoint logs
//! - [`HistoryDelta`] - The fields that changed at one timestamp
//! - [`Checkpoint`] - A full snapshot used as a replay starting point
//! - [`Tracked`] / [`TimestampScope`] - Scoped, timestamp-attributed mutation
//! - [`Observers`] - Synchronous change notification
//!
//! # Example
//!
//! ```text
//! let mut printer = TrackedPrinter::new(t0, 1, ip);   // checkpoint + initial delta at t0
//! printer.with_timestamp(t1).set_status(On)?;         // delta at t1, subscribers notified
//! printer.snapshot(t0)?;                              // state as of t0
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod checkpoint;
pub mod config;
pub mod delta;
pub mod observer;
pub mod tracked;
pub mod tracker;

#[cfg(test)]
mod test_support;

pub use checkpoint::Checkpoint;
pub use config::{DEFAULT_SNAPSHOT_FREQUENCY, TrackerConfig};
pub use delta::HistoryDelta;
pub use observer::{ModelChange, Observers, SubscriptionId};
pub use tracked::{TimestampScope, Tracked};
pub use tracker::{HistoryTracker, Transition};
