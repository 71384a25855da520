//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Timestamp, LogClock, Error, and field diffing.

mod clock;
