//! Error types for the Sortline system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every variant is a caller-ordering or lookup failure; nothing here is
//! transient, so nothing is retried.

use std::fmt;

use thiserror::Error;

use crate::timestamp::Timestamp;

/// Result alias used throughout Sortline.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Sortline operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an error for reading a tracked object that was never given a model.
    #[must_use]
    pub fn uninitialized(object: &'static str) -> Self {
        Self::new(ErrorKind::Uninitialized { object })
    }

    /// Creates an error for mutating outside of a timestamp scope.
    #[must_use]
    pub fn uninitialized_context() -> Self {
        Self::new(ErrorKind::UninitializedContext)
    }

    /// Creates an error for a point-in-time query that predates all history.
    #[must_use]
    pub fn no_checkpoint(requested: Timestamp, earliest: Option<Timestamp>) -> Self {
        Self::new(ErrorKind::NoCheckpointFound {
            requested,
            earliest,
        })
    }

    /// Creates an error for a device that is not part of a subsystem.
    #[must_use]
    pub fn unknown_device(device: impl fmt::Display) -> Self {
        Self::new(ErrorKind::UnknownDevice(device.to_string()))
    }

    /// Creates an error for adding a device that a subsystem already owns.
    #[must_use]
    pub fn duplicate_device(device: impl fmt::Display) -> Self {
        Self::new(ErrorKind::DuplicateDevice(device.to_string()))
    }

    /// Creates an error for a wall-clock time that cannot be resolved.
    #[must_use]
    pub fn invalid_time(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTime(message.into()))
    }

    /// Returns true if this is an [`ErrorKind::Uninitialized`] error.
    #[must_use]
    pub fn is_uninitialized(&self) -> bool {
        matches!(self.kind, ErrorKind::Uninitialized { .. })
    }

    /// Returns true if this is an [`ErrorKind::UninitializedContext`] error.
    #[must_use]
    pub fn is_uninitialized_context(&self) -> bool {
        matches!(self.kind, ErrorKind::UninitializedContext)
    }

    /// Returns true if this is an [`ErrorKind::NoCheckpointFound`] error.
    #[must_use]
    pub fn is_no_checkpoint(&self) -> bool {
        matches!(self.kind, ErrorKind::NoCheckpointFound { .. })
    }

    /// Returns true if this is an [`ErrorKind::UnknownDevice`] error.
    #[must_use]
    pub fn is_unknown_device(&self) -> bool {
        matches!(self.kind, ErrorKind::UnknownDevice(_))
    }

    /// Returns true if this is an [`ErrorKind::DuplicateDevice`] error.
    #[must_use]
    pub fn is_duplicate_device(&self) -> bool {
        matches!(self.kind, ErrorKind::DuplicateDevice(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A model was read before any model had been set.
    #[error("{object} has not been initialized")]
    Uninitialized {
        /// What was read.
        object: &'static str,
    },

    /// A mutation was attempted without an active timestamp scope.
    #[error("timestamp context must be set before updating a tracked model")]
    UninitializedContext,

    /// A point-in-time query asked for a moment before the first checkpoint.
    #[error("no checkpoint at or before {requested}")]
    NoCheckpointFound {
        /// The requested point in time.
        requested: Timestamp,
        /// The creation timestamp, if the tracker was ever initialized.
        earliest: Option<Timestamp>,
    },

    /// A subsystem was asked about a device it does not own.
    #[error("unknown device: {0}")]
    UnknownDevice(String),

    /// A subsystem already owns a device with the same identity.
    #[error("duplicate device: {0}")]
    DuplicateDevice(String),

    /// A log time of day could not be turned into an instant.
    #[error("invalid time: {0}")]
    InvalidTime(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file the triggering event was read from.
    pub source: Option<String>,
    /// Source line of the triggering event.
    pub line: Option<u32>,
    /// Chain of tracked objects the failure passed through.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source file.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the source line.
    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.line) {
            (Some(source), Some(line)) => write!(f, "at {source}:{line}")?,
            (Some(source), None) => write!(f, "at {source}")?,
            (None, Some(line)) => write!(f, "at line {line}")?,
            (None, None) => {}
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
