//! Containers seen by inbound scanners.

use im::OrdSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Prefix of a container's own barcode.
pub const CONTAINER_PREFIX: &str = "R";

/// Prefix of a lot barcode.
pub const LOT_PREFIX: &str = "LOT-";

/// A scanned container and the barcodes read off it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    barcode: Option<String>,
    lot_barcode: Option<String>,
    misc_barcodes: OrdSet<String>,
}

impl Container {
    /// Creates a container from its classified barcodes.
    #[must_use]
    pub fn new(barcode: Option<String>, lot_barcode: Option<String>) -> Self {
        Self {
            barcode,
            lot_barcode,
            misc_barcodes: OrdSet::new(),
        }
    }

    /// Classifies raw barcodes from a scan line.
    ///
    /// Codes starting with `R` are the container barcode and codes starting
    /// with `LOT-` the lot barcode; when several match, the last one wins.
    /// Anything else is kept as a miscellaneous barcode.
    #[must_use]
    pub fn from_barcodes<I, S>(barcodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        barcodes
            .into_iter()
            .map(Into::into)
            .fold(Self::default(), |mut container, code| {
                if code.starts_with(CONTAINER_PREFIX) {
                    container.barcode = Some(code);
                } else if code.starts_with(LOT_PREFIX) {
                    container.lot_barcode = Some(code);
                } else {
                    container.misc_barcodes.insert(code);
                }
                container
            })
    }

    /// Returns the container barcode.
    #[must_use]
    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    /// Returns the lot barcode.
    #[must_use]
    pub fn lot_barcode(&self) -> Option<&str> {
        self.lot_barcode.as_deref()
    }

    /// Returns every unclassified barcode.
    #[must_use]
    pub fn misc_barcodes(&self) -> &OrdSet<String> {
        &self.misc_barcodes
    }
}
