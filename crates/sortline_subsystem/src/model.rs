//! The inbound subsystem's aggregate model.

use std::fmt;

use im::OrdMap;
use sortline_devices::{PrinterId, PrinterModel, ScannerModel, ScannerName};
use sortline_foundation::TrackedModel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The current model of every device on the inbound line.
///
/// Derived from the devices on every change; never edited directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InboundSubsystemModel {
    printers: OrdMap<PrinterId, PrinterModel>,
    scanners: OrdMap<ScannerName, ScannerModel>,
}

impl InboundSubsystemModel {
    /// Creates a model from device models.
    #[must_use]
    pub fn new(
        printers: OrdMap<PrinterId, PrinterModel>,
        scanners: OrdMap<ScannerName, ScannerModel>,
    ) -> Self {
        Self { printers, scanners }
    }

    /// Returns every printer model by printer number.
    #[must_use]
    pub fn printers(&self) -> &OrdMap<PrinterId, PrinterModel> {
        &self.printers
    }

    /// Returns every scanner model by name.
    #[must_use]
    pub fn scanners(&self) -> &OrdMap<ScannerName, ScannerModel> {
        &self.scanners
    }

    /// Returns one printer's model.
    #[must_use]
    pub fn printer(&self, id: PrinterId) -> Option<&PrinterModel> {
        self.printers.get(&id)
    }

    /// Returns one scanner's model.
    #[must_use]
    pub fn scanner(&self, name: ScannerName) -> Option<&ScannerModel> {
        self.scanners.get(&name)
    }

    /// Returns a copy with one printer's model replaced.
    #[must_use]
    pub fn with_printer(self, id: PrinterId, model: PrinterModel) -> Self {
        Self {
            printers: self.printers.update(id, model),
            ..self
        }
    }

    /// Returns a copy with one scanner's model replaced.
    #[must_use]
    pub fn with_scanner(self, name: ScannerName, model: ScannerModel) -> Self {
        Self {
            scanners: self.scanners.update(name, model),
            ..self
        }
    }

    /// Returns a copy without one printer.
    #[must_use]
    pub fn without_printer(self, id: PrinterId) -> Self {
        Self {
            printers: self.printers.without(&id),
            ..self
        }
    }

    /// Returns a copy without one scanner.
    #[must_use]
    pub fn without_scanner(self, name: ScannerName) -> Self {
        Self {
            scanners: self.scanners.without(&name),
            ..self
        }
    }
}

/// Fields of [`InboundSubsystemModel`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InboundField {
    /// Every printer model.
    Printers,
    /// Every scanner model.
    Scanners,
}

impl fmt::Display for InboundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Printers => f.write_str("printers"),
            Self::Scanners => f.write_str("scanners"),
        }
    }
}

/// A value of one [`InboundField`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundValue {
    /// See [`InboundField::Printers`].
    Printers(OrdMap<PrinterId, PrinterModel>),
    /// See [`InboundField::Scanners`].
    Scanners(OrdMap<ScannerName, ScannerModel>),
}

impl TrackedModel for InboundSubsystemModel {
    type Field = InboundField;
    type Value = InboundValue;

    const FIELDS: &'static [InboundField] = &[InboundField::Printers, InboundField::Scanners];

    fn get(&self, field: InboundField) -> InboundValue {
        match field {
            InboundField::Printers => InboundValue::Printers(self.printers.clone()),
            InboundField::Scanners => InboundValue::Scanners(self.scanners.clone()),
        }
    }

    fn with_value(self, value: InboundValue) -> Self {
        match value {
            InboundValue::Printers(printers) => Self { printers, ..self },
            InboundValue::Scanners(scanners) => Self { scanners, ..self },
        }
    }

    fn field_of(value: &InboundValue) -> InboundField {
        match value {
            InboundValue::Printers(_) => InboundField::Printers,
            InboundValue::Scanners(_) => InboundField::Scanners,
        }
    }
}
