//! Applying parsed inbound log events to a tracked subsystem.
//!
//! A parser hands over one [`InboundEvent`] per log line together with the
//! line number and the time of day printed on it. The session turns those into
//! a [`Timestamp`] with its [`LogClock`], opens exactly one scope on the target
//! device, and lets the subsystem fold the change into its own history.

use std::net::{IpAddr, Ipv4Addr};

use chrono::NaiveTime;
use sortline_devices::{
    Container, PrinterId, PrinterModel, PrinterStatus, ScannerModel, ScannerName, TrackedPrinter,
    TrackedScanner,
};
use sortline_foundation::{ErrorContext, LogClock, Result, Timestamp};
use sortline_history::{Tracked, Transition};
use tracing::{debug, warn};

use crate::config::SubsystemConfig;
use crate::inbound::{DeviceId, TrackedInboundSubsystem};

/// Printers on a standard inbound line, with their network addresses.
pub const DEFAULT_PRINTERS: [(PrinterId, Ipv4Addr); 4] = [
    (1, Ipv4Addr::new(172, 24, 18, 38)),
    (2, Ipv4Addr::new(172, 24, 18, 39)),
    (3, Ipv4Addr::new(172, 24, 18, 40)),
    (4, Ipv4Addr::new(172, 24, 18, 41)),
];

/// Scanners on a standard inbound line.
pub const DEFAULT_SCANNERS: [ScannerName; 2] = [ScannerName::Receiving, ScannerName::Verification];

/// One parsed inbound log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    /// A printer reported `Enabled True` or `Enabled False`.
    PrinterStatusChanged {
        /// The reporting printer.
        printer: PrinterId,
        /// Whether the printer is enabled.
        enabled: bool,
    },
    /// A scanner read the barcodes on one container.
    ContainerScanned {
        /// The reporting scanner.
        scanner: ScannerName,
        /// Every barcode read off the container.
        barcodes: Vec<String>,
    },
}

impl InboundEvent {
    /// Returns the device the event is about.
    #[must_use]
    pub fn device(&self) -> DeviceId {
        match self {
            Self::PrinterStatusChanged { printer, .. } => DeviceId::Printer(*printer),
            Self::ContainerScanned { scanner, .. } => DeviceId::Scanner(*scanner),
        }
    }
}

/// What applying one event did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The event reached its device.
    Recorded(Transition),
    /// The event named a device outside the subsystem and was ignored.
    Skipped,
}

/// A subsystem being driven line by line from one log file.
#[derive(Debug)]
pub struct InboundSession {
    clock: LogClock,
    source: Option<String>,
    last_line: Option<u32>,
    subsystem: TrackedInboundSubsystem,
}

impl InboundSession {
    /// Creates a session over an existing subsystem.
    #[must_use]
    pub fn new(clock: LogClock, subsystem: TrackedInboundSubsystem) -> Self {
        Self {
            clock,
            source: None,
            last_line: None,
            subsystem,
        }
    }

    /// Creates a session over the standard inbound layout, created at
    /// `first_entry` on line 1.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTime` if `first_entry` does not exist on the clock's date.
    pub fn with_default_layout(
        clock: LogClock,
        first_entry: NaiveTime,
        config: SubsystemConfig,
    ) -> Result<Self> {
        let created = clock.timestamp(first_entry, 1)?;
        let printers = DEFAULT_PRINTERS.iter().map(|&(id, address)| {
            TrackedPrinter::from_model(
                created,
                PrinterModel::new(id, IpAddr::V4(address)),
                config.device_tracker,
            )
        });
        let scanners = DEFAULT_SCANNERS.iter().map(|&name| {
            TrackedScanner::from_model(created, ScannerModel::new(name, []), config.device_tracker)
        });
        let subsystem = TrackedInboundSubsystem::new(created, printers, scanners, config)?;
        Ok(Self::new(clock, subsystem))
    }

    /// Names the file events are read from, for error context.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the clock used to build timestamps.
    #[must_use]
    pub const fn clock(&self) -> &LogClock {
        &self.clock
    }

    /// Returns the source file name, if set.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the line of the most recently applied event.
    #[must_use]
    pub const fn last_line(&self) -> Option<u32> {
        self.last_line
    }

    /// Returns the subsystem.
    #[must_use]
    pub const fn subsystem(&self) -> &TrackedInboundSubsystem {
        &self.subsystem
    }

    /// Returns the subsystem mutably.
    pub fn subsystem_mut(&mut self) -> &mut TrackedInboundSubsystem {
        &mut self.subsystem
    }

    /// Ends the session, returning the subsystem and its history.
    #[must_use]
    pub fn into_subsystem(self) -> TrackedInboundSubsystem {
        self.subsystem
    }

    /// Applies one event read from `line`, stamped `time_of_day`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTime` if the time cannot be placed on the clock's date.
    /// Errors carry the line and source file.
    pub fn apply(
        &mut self,
        line: u32,
        time_of_day: NaiveTime,
        event: InboundEvent,
    ) -> Result<Applied> {
        let applied = self
            .route(line, time_of_day, event)
            .map_err(|err| err.with_context(self.error_context(line)))?;
        self.last_line = Some(line);
        Ok(applied)
    }

    fn route(
        &mut self,
        line: u32,
        time_of_day: NaiveTime,
        event: InboundEvent,
    ) -> Result<Applied> {
        let timestamp = self.clock.timestamp(time_of_day, line)?;
        let device = event.device();
        let known = match device {
            DeviceId::Printer(id) => self.subsystem.contains_printer(id),
            DeviceId::Scanner(name) => self.subsystem.contains_scanner(name),
        };
        if !known {
            warn!(line, %device, "skipping event for a device outside the inbound subsystem");
            return Ok(Applied::Skipped);
        }

        let transition = match event {
            InboundEvent::PrinterStatusChanged { printer, enabled } => {
                let status = PrinterStatus::from_enabled(enabled);
                self.subsystem.with_printer(printer, |p| {
                    p.with_timestamp(timestamp).set_status(status)
                })?
            }
            InboundEvent::ContainerScanned { scanner, barcodes } => {
                let container = Container::from_barcodes(barcodes);
                self.subsystem.with_scanner(scanner, |s| {
                    s.with_timestamp(timestamp).queue_container(container)
                })?
            }
        };
        debug!(%timestamp, %device, ?transition, "applied inbound event");
        Ok(Applied::Recorded(transition))
    }

    fn error_context(&self, line: u32) -> ErrorContext {
        let context = ErrorContext::new()
            .with_line(line)
            .with_frame("inbound subsystem");
        match &self.source {
            Some(source) => context.with_source(source.clone()),
            None => context,
        }
    }

    /// Returns the timestamp `line` would get at `time_of_day`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTime` if the time cannot be placed on the clock's date.
    pub fn timestamp(&self, line: u32, time_of_day: NaiveTime) -> Result<Timestamp> {
        self.clock.timestamp(time_of_day, line)
    }
}
