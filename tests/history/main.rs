//! Integration tests for Layer 1: History
//!
//! Tests delta and checkpoint recording, point-in-time queries, timestamp
//! scopes, and change notification against a model defined outside the crate.

mod notifications;
mod scopes;
mod snapshots;
