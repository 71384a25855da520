//! Timestamps, errors, and field-level model diffing for Sortline.
//!
//! This crate provides:
//! - [`Timestamp`] - Total ordering key for log events (wall clock, then line)
//! - [`LogClock`] - Builds timestamps for one log file
//! - [`TrackedModel`] - Closed field enumeration for diffable models
//! - [`diff_models`] - Field-by-field comparison of two models
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod diff;
pub mod error;
pub mod model;
pub mod timestamp;

pub use clock::LogClock;
pub use diff::{FieldChange, diff_models, populated_fields};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use model::TrackedModel;
pub use timestamp::Timestamp;
