//! Small enumerations shared by device models.

use std::fmt;
use std::str::FromStr;

use sortline_foundation::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Printer power and activity state.
///
/// The discriminants are bit flags: `On` is `Enabled | Active`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum PrinterStatus {
    /// Neither enabled nor active.
    Off = 0x00,
    /// Enabled but idle.
    Enabled = 0x01,
    /// Active but not enabled.
    Active = 0x02,
    /// Enabled and active.
    On = 0x03,
}

impl PrinterStatus {
    /// Maps the `Enabled True|False` flag of a status-update line.
    #[must_use]
    pub const fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }

    /// Builds a status from its flag bits.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0x00 => Some(Self::Off),
            0x01 => Some(Self::Enabled),
            0x02 => Some(Self::Active),
            0x03 => Some(Self::On),
            _ => None,
        }
    }

    /// Returns the flag bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns true if the enabled flag is set.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.bits() & Self::Enabled.bits() != 0
    }

    /// Returns true if the active flag is set.
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.bits() & Self::Active.bits() != 0
    }
}

impl fmt::Display for PrinterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "Off",
            Self::Enabled => "Enabled",
            Self::Active => "Active",
            Self::On => "On",
        };
        f.write_str(name)
    }
}

/// Which scanner on the inbound line a container passed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScannerName {
    /// Placeholder for an unnamed scanner.
    #[default]
    None,
    /// The receiving scanner.
    Receiving,
    /// The verification scanner.
    Verification,
}

impl fmt::Display for ScannerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Receiving => "Receiving",
            Self::Verification => "Verification",
        };
        f.write_str(name)
    }
}

impl FromStr for ScannerName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Self::None),
            "Receiving" => Ok(Self::Receiving),
            "Verification" => Ok(Self::Verification),
            other => Err(Error::unknown_device(format!("scanner {other}"))),
        }
    }
}
