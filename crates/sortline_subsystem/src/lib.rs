//! Tracked subsystem aggregates for Sortline.
//!
//! A subsystem owns a set of tracked devices and keeps a history of their
//! combined state. Every device change is folded into that history at the
//! device's own timestamp, so the aggregate answers "what did the whole line
//! look like at t" without consulting the devices.
//!
//! This crate provides:
//! - [`TrackedInboundSubsystem`] / [`InboundSubsystemModel`] - The inbound line aggregate
//! - [`InboundSession`] / [`InboundEvent`] - Line-by-line application of parsed log events
//! - [`SubsystemConfig`] - History settings for the aggregate and its devices

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod inbound;
pub mod model;
pub mod session;


pub use config::SubsystemConfig;
pub use inbound::{DeviceId, TrackedInboundSubsystem};
pub use model::{InboundField, InboundSubsystemModel, InboundValue};
pub use session::{Applied, DEFAULT_PRINTERS, DEFAULT_SCANNERS, InboundEvent, InboundSession};
