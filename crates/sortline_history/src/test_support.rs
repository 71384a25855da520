//! A small model and timestamp helper shared by this crate's unit tests.

use std::fmt;

use chrono::{FixedOffset, TimeZone};
use sortline_foundation::{Timestamp, TrackedModel};

/// Timestamp `n` seconds after a fixed base, attributed to line `n`.
pub fn ts(n: u32) -> Timestamp {
    let offset = FixedOffset::east_opt(0).unwrap();
    let base = offset.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap();
    Timestamp::new(base + chrono::Duration::seconds(i64::from(n)), n)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Valve {
    pub name: String,
    pub open: bool,
    pub flow: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValveField {
    Name,
    Open,
    Flow,
}

impl fmt::Display for ValveField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ValveValue {
    Name(String),
    Open(bool),
    Flow(u32),
}

impl TrackedModel for Valve {
    type Field = ValveField;
    type Value = ValveValue;

    const FIELDS: &'static [ValveField] = &[ValveField::Name, ValveField::Open, ValveField::Flow];

    fn get(&self, field: ValveField) -> ValveValue {
        match field {
            ValveField::Name => ValveValue::Name(self.name.clone()),
            ValveField::Open => ValveValue::Open(self.open),
            ValveField::Flow => ValveValue::Flow(self.flow),
        }
    }

    fn with_value(self, value: ValveValue) -> Self {
        match value {
            ValveValue::Name(name) => Self { name, ..self },
            ValveValue::Open(open) => Self { open, ..self },
            ValveValue::Flow(flow) => Self { flow, ..self },
        }
    }

    fn field_of(value: &ValveValue) -> ValveField {
        match value {
            ValveValue::Name(_) => ValveField::Name,
            ValveValue::Open(_) => ValveField::Open,
            ValveValue::Flow(_) => ValveField::Flow,
        }
    }
}
