//! Label printers (print-and-apply units on the receiving line).

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use chrono::NaiveTime;
use sortline_foundation::{Result, Timestamp, TrackedModel};
use sortline_history::{HistoryTracker, Tracked, TrackerConfig, Transition};

use crate::kinds::PrinterStatus;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Printer number as it appears in log lines.
pub type PrinterId = u32;

// =============================================================================
// Model
// =============================================================================

/// A printer's complete state at an instant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrinterModel {
    printer_id: PrinterId,
    ip_address: IpAddr,
    status: Option<PrinterStatus>,
    last_used: Option<NaiveTime>,
}

impl Default for PrinterModel {
    fn default() -> Self {
        Self {
            printer_id: 0,
            ip_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            status: None,
            last_used: None,
        }
    }
}

impl PrinterModel {
    /// Creates a printer with no known status.
    #[must_use]
    pub const fn new(printer_id: PrinterId, ip_address: IpAddr) -> Self {
        Self {
            printer_id,
            ip_address,
            status: None,
            last_used: None,
        }
    }

    /// Returns the printer number.
    #[must_use]
    pub const fn printer_id(&self) -> PrinterId {
        self.printer_id
    }

    /// Returns the printer's network address.
    #[must_use]
    pub const fn ip_address(&self) -> IpAddr {
        self.ip_address
    }

    /// Returns the last reported status.
    #[must_use]
    pub const fn status(&self) -> Option<PrinterStatus> {
        self.status
    }

    /// Returns when the printer last printed.
    #[must_use]
    pub const fn last_used(&self) -> Option<NaiveTime> {
        self.last_used
    }

    /// Returns a copy with a different printer number.
    #[must_use]
    pub const fn with_printer_id(mut self, printer_id: PrinterId) -> Self {
        self.printer_id = printer_id;
        self
    }

    /// Returns a copy with a different address.
    #[must_use]
    pub const fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = ip_address;
        self
    }

    /// Returns a copy with a different status.
    #[must_use]
    pub const fn with_status(mut self, status: Option<PrinterStatus>) -> Self {
        self.status = status;
        self
    }

    /// Returns a copy with a different last-used time.
    #[must_use]
    pub const fn with_last_used(mut self, last_used: Option<NaiveTime>) -> Self {
        self.last_used = last_used;
        self
    }
}

/// Fields of [`PrinterModel`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrinterField {
    /// The printer number.
    PrinterId,
    /// The network address.
    IpAddress,
    /// The last reported status.
    Status,
    /// When the printer last printed.
    LastUsed,
}

impl fmt::Display for PrinterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PrinterId => "printer_id",
            Self::IpAddress => "ip_address",
            Self::Status => "status",
            Self::LastUsed => "last_used",
        };
        f.write_str(name)
    }
}

/// A value of one [`PrinterField`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrinterValue {
    /// See [`PrinterField::PrinterId`].
    PrinterId(PrinterId),
    /// See [`PrinterField::IpAddress`].
    IpAddress(IpAddr),
    /// See [`PrinterField::Status`].
    Status(Option<PrinterStatus>),
    /// See [`PrinterField::LastUsed`].
    LastUsed(Option<NaiveTime>),
}

impl TrackedModel for PrinterModel {
    type Field = PrinterField;
    type Value = PrinterValue;

    const FIELDS: &'static [PrinterField] = &[
        PrinterField::PrinterId,
        PrinterField::IpAddress,
        PrinterField::Status,
        PrinterField::LastUsed,
    ];

    fn get(&self, field: PrinterField) -> PrinterValue {
        match field {
            PrinterField::PrinterId => PrinterValue::PrinterId(self.printer_id),
            PrinterField::IpAddress => PrinterValue::IpAddress(self.ip_address),
            PrinterField::Status => PrinterValue::Status(self.status),
            PrinterField::LastUsed => PrinterValue::LastUsed(self.last_used),
        }
    }

    fn with_value(self, value: PrinterValue) -> Self {
        match value {
            PrinterValue::PrinterId(id) => self.with_printer_id(id),
            PrinterValue::IpAddress(ip) => self.with_ip_address(ip),
            PrinterValue::Status(status) => self.with_status(status),
            PrinterValue::LastUsed(time) => self.with_last_used(time),
        }
    }

    fn field_of(value: &PrinterValue) -> PrinterField {
        match value {
            PrinterValue::PrinterId(_) => PrinterField::PrinterId,
            PrinterValue::IpAddress(_) => PrinterField::IpAddress,
            PrinterValue::Status(_) => PrinterField::Status,
            PrinterValue::LastUsed(_) => PrinterField::LastUsed,
        }
    }
}

// =============================================================================
// Tracked Printer
// =============================================================================

/// A printer whose every state change is recorded.
///
/// Setters must be called inside a scope opened with
/// [`Tracked::with_timestamp`]; outside one they fail with
/// `UninitializedContext`.
#[derive(Debug, Default)]
pub struct TrackedPrinter {
    tracker: HistoryTracker<PrinterModel>,
}

impl TrackedPrinter {
    /// Creates a printer at `created` with no known status.
    #[must_use]
    pub fn new(created: Timestamp, printer_id: PrinterId, ip_address: IpAddr) -> Self {
        Self::from_model(
            created,
            PrinterModel::new(printer_id, ip_address),
            TrackerConfig::default(),
        )
    }

    /// Creates a printer at `created` from a full model.
    #[must_use]
    pub fn from_model(created: Timestamp, model: PrinterModel, config: TrackerConfig) -> Self {
        Self {
            tracker: HistoryTracker::created(created, model, config),
        }
    }

    /// Creates a printer with no state; every read fails until a model is set.
    #[must_use]
    pub fn uninitialized(config: TrackerConfig) -> Self {
        Self {
            tracker: HistoryTracker::with_config(config),
        }
    }

    /// Returns the printer number.
    pub fn printer_id(&self) -> Result<PrinterId> {
        Ok(self.tracker.model()?.printer_id())
    }

    /// Returns the network address.
    pub fn ip_address(&self) -> Result<IpAddr> {
        Ok(self.tracker.model()?.ip_address())
    }

    /// Returns the last reported status.
    pub fn status(&self) -> Result<Option<PrinterStatus>> {
        Ok(self.tracker.model()?.status())
    }

    /// Returns when the printer last printed.
    pub fn last_used(&self) -> Result<Option<NaiveTime>> {
        Ok(self.tracker.model()?.last_used())
    }

    /// Changes the printer number.
    pub fn set_printer_id(&mut self, printer_id: PrinterId) -> Result<Transition> {
        self.tracker
            .update_model_with(|m| m.clone().with_printer_id(printer_id))
    }

    /// Changes the network address.
    pub fn set_ip_address(&mut self, ip_address: IpAddr) -> Result<Transition> {
        self.tracker
            .update_model_with(|m| m.clone().with_ip_address(ip_address))
    }

    /// Changes the status.
    pub fn set_status(&mut self, status: impl Into<Option<PrinterStatus>>) -> Result<Transition> {
        let status = status.into();
        self.tracker
            .update_model_with(|m| m.clone().with_status(status))
    }

    /// Changes the last-used time.
    pub fn set_last_used(&mut self, last_used: impl Into<Option<NaiveTime>>) -> Result<Transition> {
        let last_used = last_used.into();
        self.tracker
            .update_model_with(|m| m.clone().with_last_used(last_used))
    }

    /// Replaces every field at once at an explicit timestamp.
    pub fn update_with_timestamp(
        &mut self,
        timestamp: Timestamp,
        printer_id: PrinterId,
        ip_address: IpAddr,
        status: Option<PrinterStatus>,
        last_used: Option<NaiveTime>,
    ) -> Transition {
        let model = PrinterModel::new(printer_id, ip_address)
            .with_status(status)
            .with_last_used(last_used);
        self.tracker.update_with_timestamp(timestamp, model)
    }
}

impl Tracked for TrackedPrinter {
    type Model = PrinterModel;

    fn tracker(&self) -> &HistoryTracker<PrinterModel> {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut HistoryTracker<PrinterModel> {
        &mut self.tracker
    }
}
