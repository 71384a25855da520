//! Tracked printer and scanner devices for Sortline.
//!
//! Each device wraps a [`HistoryTracker`](sortline_history::HistoryTracker)
//! and exposes typed accessors that turn field-level gets and sets into model
//! reads and copy-with-changes updates.
//!
//! This crate provides:
//! - [`TrackedPrinter`] / [`PrinterModel`] - Print-and-apply label printers
//! - [`TrackedScanner`] / [`ScannerModel`] - Inbound barcode scanners
//! - [`Container`] - Barcodes read off one scanned container
//! - [`PrinterStatus`], [`ScannerName`] - Shared device enumerations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod container;
pub mod kinds;
pub mod printer;
pub mod scanner;

#[cfg(test)]
mod test_support;

pub use container::Container;
pub use kinds::{PrinterStatus, ScannerName};
pub use printer::{PrinterField, PrinterId, PrinterModel, PrinterValue, TrackedPrinter};
pub use scanner::{ScannerField, ScannerModel, ScannerValue, TrackedScanner};
