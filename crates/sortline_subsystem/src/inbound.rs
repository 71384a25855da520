//! The inbound subsystem: printers and scanners tracked as one aggregate.
//!
//! The aggregate owns its devices and subscribes to each of them. A device
//! change is queued by the subscription and folded into the aggregate's own
//! history at the device's timestamp, so a point-in-time query on the
//! aggregate sees every device as it was at that moment.
//!
//! Devices are only reachable mutably through [`TrackedInboundSubsystem::with_printer`]
//! and [`TrackedInboundSubsystem::with_scanner`], which drain the queue before
//! returning. A device that changes its own number or name there moves to its
//! new key, unless another device already holds it.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use im::OrdMap;
use sortline_devices::{
    PrinterId, PrinterModel, ScannerModel, ScannerName, TrackedPrinter, TrackedScanner,
};
use sortline_foundation::{Error, Result, Timestamp};
use sortline_history::{HistoryTracker, SubscriptionId, Tracked, Transition};
use tracing::{debug, warn};

use crate::config::SubsystemConfig;
use crate::model::InboundSubsystemModel;

/// Identity of a device within the inbound subsystem.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceId {
    /// A printer, by number.
    Printer(PrinterId),
    /// A scanner, by name.
    Scanner(ScannerName),
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Printer(id) => write!(f, "printer {id}"),
            Self::Scanner(name) => write!(f, "{name} scanner"),
        }
    }
}

/// A device model reported by a subscription, waiting to be folded in.
#[derive(Debug)]
struct PendingChange<M> {
    timestamp: Timestamp,
    model: M,
}

type Inbox<M> = Rc<RefCell<VecDeque<PendingChange<M>>>>;

#[derive(Debug)]
struct Attached<D> {
    device: D,
    subscription: SubscriptionId,
}

/// The inbound line's printers and scanners, with a history of their combined state.
#[derive(Debug)]
pub struct TrackedInboundSubsystem {
    tracker: HistoryTracker<InboundSubsystemModel>,
    printers: BTreeMap<PrinterId, Attached<TrackedPrinter>>,
    scanners: BTreeMap<ScannerName, Attached<TrackedScanner>>,
    printer_reports: Inbox<PrinterModel>,
    scanner_reports: Inbox<ScannerModel>,
}

impl TrackedInboundSubsystem {
    /// Creates a subsystem at `created` owning the given devices.
    ///
    /// # Errors
    ///
    /// Returns `Uninitialized` if a device has no model, and `DuplicateDevice`
    /// if two devices share a printer number or scanner name.
    pub fn new(
        created: Timestamp,
        printers: impl IntoIterator<Item = TrackedPrinter>,
        scanners: impl IntoIterator<Item = TrackedScanner>,
        config: SubsystemConfig,
    ) -> Result<Self> {
        let mut subsystem = Self {
            tracker: HistoryTracker::with_config(config.tracker),
            printers: BTreeMap::new(),
            scanners: BTreeMap::new(),
            printer_reports: Inbox::default(),
            scanner_reports: Inbox::default(),
        };
        for printer in printers {
            subsystem.attach_printer(printer)?;
        }
        for scanner in scanners {
            subsystem.attach_scanner(scanner)?;
        }

        let model = subsystem.project()?;
        debug!(
            %created,
            printers = subsystem.printers.len(),
            scanners = subsystem.scanners.len(),
            "creating inbound subsystem"
        );
        subsystem.tracker.update_with_timestamp(created, model);
        Ok(subsystem)
    }

    // -------------------------------------------------------------------------
    // Devices
    // -------------------------------------------------------------------------

    /// Returns a printer by number.
    #[must_use]
    pub fn printer(&self, id: PrinterId) -> Option<&TrackedPrinter> {
        self.printers.get(&id).map(|attached| &attached.device)
    }

    /// Returns a scanner by name.
    #[must_use]
    pub fn scanner(&self, name: ScannerName) -> Option<&TrackedScanner> {
        self.scanners.get(&name).map(|attached| &attached.device)
    }

    /// Returns true if the subsystem owns the printer.
    #[must_use]
    pub fn contains_printer(&self, id: PrinterId) -> bool {
        self.printers.contains_key(&id)
    }

    /// Returns true if the subsystem owns the scanner.
    #[must_use]
    pub fn contains_scanner(&self, name: ScannerName) -> bool {
        self.scanners.contains_key(&name)
    }

    /// Returns every printer number, ascending.
    pub fn printer_ids(&self) -> impl Iterator<Item = PrinterId> + '_ {
        self.printers.keys().copied()
    }

    /// Returns every scanner name, ascending.
    pub fn scanner_names(&self) -> impl Iterator<Item = ScannerName> + '_ {
        self.scanners.keys().copied()
    }

    /// Mutates one printer and folds every change it records into the aggregate.
    ///
    /// If `update` gives the printer a new number, the printer is re-keyed
    /// under it.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDevice` if the printer is not owned here, or whatever
    /// `update` returns. Returns `DuplicateDevice` if the new number belongs to
    /// another printer; the printer then gets its old number back at its latest
    /// timestamp and every other change is still folded in.
    pub fn with_printer<R>(
        &mut self,
        id: PrinterId,
        update: impl FnOnce(&mut TrackedPrinter) -> Result<R>,
    ) -> Result<R> {
        let attached = self
            .printers
            .get_mut(&id)
            .ok_or_else(|| Error::unknown_device(DeviceId::Printer(id)))?;
        let outcome = update(&mut attached.device);
        let rekeyed = self.rekey_printer(id);
        self.propagate_printer(rekeyed.as_ref().map_or(id, |key| *key))?;
        rekeyed?;
        outcome
    }

    /// Mutates one scanner and folds every change it records into the aggregate.
    ///
    /// If `update` renames the scanner, the scanner is re-keyed under its new
    /// name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDevice` if the scanner is not owned here, or whatever
    /// `update` returns. Returns `DuplicateDevice` if the new name belongs to
    /// another scanner; the scanner is then renamed back.
    pub fn with_scanner<R>(
        &mut self,
        name: ScannerName,
        update: impl FnOnce(&mut TrackedScanner) -> Result<R>,
    ) -> Result<R> {
        let attached = self
            .scanners
            .get_mut(&name)
            .ok_or_else(|| Error::unknown_device(DeviceId::Scanner(name)))?;
        let outcome = update(&mut attached.device);
        let rekeyed = self.rekey_scanner(name);
        self.propagate_scanner(rekeyed.as_ref().map_or(name, |key| *key))?;
        rekeyed?;
        outcome
    }

    /// Takes ownership of a printer, recording the new device set at `at`.
    ///
    /// # Errors
    ///
    /// Returns `Uninitialized` if the printer has no model, and
    /// `DuplicateDevice` if its number is already taken.
    pub fn add_printer(&mut self, at: Timestamp, printer: TrackedPrinter) -> Result<Transition> {
        let id = self.attach_printer(printer)?;
        debug!(%at, printer = id, "adding printer");
        self.record_device_set(at)
    }

    /// Takes ownership of a scanner, recording the new device set at `at`.
    ///
    /// # Errors
    ///
    /// Returns `Uninitialized` if the scanner has no model, and
    /// `DuplicateDevice` if its name is already taken.
    pub fn add_scanner(&mut self, at: Timestamp, scanner: TrackedScanner) -> Result<Transition> {
        let name = self.attach_scanner(scanner)?;
        debug!(%at, scanner = %name, "adding scanner");
        self.record_device_set(at)
    }

    /// Releases a printer, recording the new device set at `at`.
    ///
    /// The returned printer keeps its history but no longer reports here.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDevice` if the printer is not owned here.
    pub fn remove_printer(&mut self, at: Timestamp, id: PrinterId) -> Result<TrackedPrinter> {
        let Attached {
            mut device,
            subscription,
        } = self
            .printers
            .remove(&id)
            .ok_or_else(|| Error::unknown_device(DeviceId::Printer(id)))?;
        device.unsubscribe(subscription);
        debug!(%at, printer = id, "removing printer");
        self.record_device_set(at)?;
        Ok(device)
    }

    /// Releases a scanner, recording the new device set at `at`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDevice` if the scanner is not owned here.
    pub fn remove_scanner(&mut self, at: Timestamp, name: ScannerName) -> Result<TrackedScanner> {
        let Attached {
            mut device,
            subscription,
        } = self
            .scanners
            .remove(&name)
            .ok_or_else(|| Error::unknown_device(DeviceId::Scanner(name)))?;
        device.unsubscribe(subscription);
        debug!(%at, scanner = %name, "removing scanner");
        self.record_device_set(at)?;
        Ok(device)
    }

    /// Re-derives the aggregate from the devices' live models at the current
    /// scope's timestamp.
    ///
    /// # Errors
    ///
    /// Returns `UninitializedContext` outside of a timestamp scope.
    pub fn refresh(&mut self) -> Result<Transition> {
        let model = self.project()?;
        self.tracker.update_model(model)
    }

    // -------------------------------------------------------------------------
    // Propagation
    // -------------------------------------------------------------------------

    fn attach_printer(&mut self, mut printer: TrackedPrinter) -> Result<PrinterId> {
        let id = printer.printer_id()?;
        if self.printers.contains_key(&id) {
            return Err(Error::duplicate_device(DeviceId::Printer(id)));
        }
        let reports = Rc::clone(&self.printer_reports);
        let subscription = printer.subscribe(move |change| {
            reports.borrow_mut().push_back(PendingChange {
                timestamp: change.timestamp,
                model: change.new.clone(),
            });
        });
        self.printers.insert(
            id,
            Attached {
                device: printer,
                subscription,
            },
        );
        Ok(id)
    }

    fn attach_scanner(&mut self, mut scanner: TrackedScanner) -> Result<ScannerName> {
        let name = scanner.name()?;
        if self.scanners.contains_key(&name) {
            return Err(Error::duplicate_device(DeviceId::Scanner(name)));
        }
        let reports = Rc::clone(&self.scanner_reports);
        let subscription = scanner.subscribe(move |change| {
            reports.borrow_mut().push_back(PendingChange {
                timestamp: change.timestamp,
                model: change.new.clone(),
            });
        });
        self.scanners.insert(
            name,
            Attached {
                device: scanner,
                subscription,
            },
        );
        Ok(name)
    }

    /// Builds the aggregate model from every device's live model.
    fn project(&self) -> Result<InboundSubsystemModel> {
        let printers = self
            .printers
            .iter()
            .map(|(id, attached)| Ok((*id, attached.device.model()?.clone())))
            .collect::<Result<OrdMap<_, _>>>()?;
        let scanners = self
            .scanners
            .iter()
            .map(|(name, attached)| Ok((*name, attached.device.model()?.clone())))
            .collect::<Result<OrdMap<_, _>>>()?;
        Ok(InboundSubsystemModel::new(printers, scanners))
    }

    /// Moves a printer whose number no longer matches its key.
    ///
    /// Returns the key the printer is held under afterwards.
    fn rekey_printer(&mut self, id: PrinterId) -> Result<PrinterId> {
        let Some(attached) = self.printers.get(&id) else {
            return Ok(id);
        };
        let claimed = attached.device.printer_id()?;
        if claimed == id {
            return Ok(id);
        }

        if self.printers.contains_key(&claimed) {
            warn!(printer = id, claimed, "refusing a printer number already in use");
            if let Some(attached) = self.printers.get_mut(&id) {
                let at = attached
                    .device
                    .tracker()
                    .latest_timestamp()
                    .ok_or_else(|| Error::uninitialized("printer"))?;
                attached.device.with_timestamp(at).set_printer_id(id)?;
            }
            return Err(Error::duplicate_device(DeviceId::Printer(claimed)));
        }

        if let Some(attached) = self.printers.remove(&id) {
            debug!(from = id, to = claimed, "re-keying printer");
            self.printers.insert(claimed, attached);
        }
        Ok(claimed)
    }

    /// Moves a scanner whose name no longer matches its key.
    fn rekey_scanner(&mut self, name: ScannerName) -> Result<ScannerName> {
        let Some(attached) = self.scanners.get(&name) else {
            return Ok(name);
        };
        let claimed = attached.device.name()?;
        if claimed == name {
            return Ok(name);
        }

        if self.scanners.contains_key(&claimed) {
            warn!(scanner = %name, %claimed, "refusing a scanner name already in use");
            if let Some(attached) = self.scanners.get_mut(&name) {
                let at = attached
                    .device
                    .tracker()
                    .latest_timestamp()
                    .ok_or_else(|| Error::uninitialized("scanner"))?;
                attached.device.with_timestamp(at).set_name(name)?;
            }
            return Err(Error::duplicate_device(DeviceId::Scanner(claimed)));
        }

        if let Some(attached) = self.scanners.remove(&name) {
            debug!(from = %name, to = %claimed, "re-keying scanner");
            self.scanners.insert(claimed, attached);
        }
        Ok(claimed)
    }

    /// Folds queued printer changes into the aggregate, oldest first.
    ///
    /// `key` is where the reporting printer is held now. Each reported model
    /// replaces that entry, so several changes made in one call each leave
    /// their own aggregate state behind. A reported number held by another
    /// printer is folded in as `key`.
    fn propagate_printer(&mut self, key: PrinterId) -> Result<()> {
        loop {
            let next = self.printer_reports.borrow_mut().pop_front();
            let Some(PendingChange { timestamp, model }) = next else {
                return Ok(());
            };

            let claimed = model.printer_id();
            let model = if claimed != key && self.printers.contains_key(&claimed) {
                model.with_printer_id(key)
            } else {
                model
            };
            let id = model.printer_id();
            debug!(%timestamp, device = %DeviceId::Printer(id), "folding device change");
            let aggregate = self.project()?.without_printer(key).with_printer(id, model);
            self.tracker.update_with_timestamp(timestamp, aggregate);
        }
    }

    /// Folds queued scanner changes into the aggregate, oldest first.
    fn propagate_scanner(&mut self, key: ScannerName) -> Result<()> {
        loop {
            let next = self.scanner_reports.borrow_mut().pop_front();
            let Some(PendingChange { timestamp, model }) = next else {
                return Ok(());
            };

            let claimed = model.name();
            let model = if claimed != key && self.scanners.contains_key(&claimed) {
                model.with_name(key)
            } else {
                model
            };
            let name = model.name();
            debug!(%timestamp, device = %DeviceId::Scanner(name), "folding device change");
            let aggregate = self.project()?.without_scanner(key).with_scanner(name, model);
            self.tracker.update_with_timestamp(timestamp, aggregate);
        }
    }

    fn record_device_set(&mut self, at: Timestamp) -> Result<Transition> {
        let model = self.project()?;
        Ok(self.tracker.update_with_timestamp(at, model))
    }
}

impl Tracked for TrackedInboundSubsystem {
    type Model = InboundSubsystemModel;

    fn tracker(&self) -> &HistoryTracker<InboundSubsystemModel> {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut HistoryTracker<InboundSubsystemModel> {
        &mut self.tracker
    }
}
