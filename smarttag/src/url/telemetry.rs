// smarttag/src/url/telemetry.rs

//! Telemetry section of the URL envelope.
//!
//! Each counter is a protocol-buffer varint field (`tag = field << 3`).
//! Fields appear in a fixed order that differs from their field numbers.

use log::warn;

use crate::constants::MAX_TELEMETRY_LEN;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Health counters reported with every URL. `None` means the value is not
/// available and the field is left out; `Some(0)` is sent, except for the
/// battery where 0 means no reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetrySnapshot {
    pub watchdog_resets: Option<u32>,
    pub external_resets: Option<u32>,
    pub power_on_resets: Option<u32>,
    pub serial_failures: Option<u32>,
    pub brown_out_resets: Option<u32>,
    /// Raw battery reading; the station reports 0 as "no reading".
    pub battery_voltage: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    SerialFailures = 1,
    WatchdogResets = 2,
    BrownOutResets = 3,
    ExternalResets = 4,
    PowerOnResets = 5,
    BatteryVoltage = 6,
}

const WIRE_ORDER: [Field; 6] = [
    Field::WatchdogResets,
    Field::ExternalResets,
    Field::PowerOnResets,
    Field::SerialFailures,
    Field::BrownOutResets,
    Field::BatteryVoltage,
];

impl Field {
    fn from_number(n: u8) -> Option<Self> {
        WIRE_ORDER.iter().copied().find(|f| *f as u8 == n)
    }

    fn tag(self) -> u8 {
        (self as u8) << 3
    }
}

fn varint_len(mut v: u32) -> usize {
    let mut n = 1;
    while v >= 0x80 {
        v >>= 7;
        n += 1;
    }
    n
}

fn put_varint(out: &mut Vec<u8>, mut v: u32) {
    while v >= 0x80 {
        out.push((v as u8 & 0x7f) | 0x80);
        v >>= 7;
    }
    out.push(v as u8);
}

fn read_varint(bytes: &[u8], pos: &mut usize) -> Result<u32> {
    let mut value: u32 = 0;
    for shift in (0..35).step_by(7) {
        let b = *bytes
            .get(*pos)
            .ok_or_else(|| Error::Encoding("truncated telemetry varint".into()))?;
        *pos += 1;
        let part = u32::from(b & 0x7f);
        if shift == 28 && part > 0x0f {
            return Err(Error::Encoding("telemetry varint overflows u32".into()));
        }
        value |= part << shift;
        if b & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(Error::Encoding("telemetry varint too long".into()))
}

impl TelemetrySnapshot {
    fn get(&self, field: Field) -> Option<u32> {
        match field {
            Field::SerialFailures => self.serial_failures,
            Field::WatchdogResets => self.watchdog_resets,
            Field::BrownOutResets => self.brown_out_resets,
            Field::ExternalResets => self.external_resets,
            Field::PowerOnResets => self.power_on_resets,
            Field::BatteryVoltage => self.battery_voltage.filter(|&v| v != 0).map(u32::from),
        }
    }

    fn set(&mut self, field: Field, value: u32) -> Result<()> {
        match field {
            Field::SerialFailures => self.serial_failures = Some(value),
            Field::WatchdogResets => self.watchdog_resets = Some(value),
            Field::BrownOutResets => self.brown_out_resets = Some(value),
            Field::ExternalResets => self.external_resets = Some(value),
            Field::PowerOnResets => self.power_on_resets = Some(value),
            Field::BatteryVoltage => {
                let v = u8::try_from(value).map_err(|_| {
                    Error::Encoding(format!("battery voltage {} out of range", value))
                })?;
                self.battery_voltage = Some(v);
            }
        }
        Ok(())
    }

    /// Serialize the available fields, at most `MAX_TELEMETRY_LEN` bytes.
    /// A field that would overflow the budget is dropped.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MAX_TELEMETRY_LEN);
        for field in WIRE_ORDER {
            let Some(value) = self.get(field) else {
                continue;
            };
            if out.len() + 1 + varint_len(value) > MAX_TELEMETRY_LEN {
                warn!("telemetry field {:?}={} dropped: budget exhausted", field, value);
                continue;
            }
            out.push(field.tag());
            put_varint(&mut out, value);
        }
        out
    }

    /// Parse a telemetry section. Fields may appear in any order.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut snapshot = Self::default();
        let mut pos = 0;
        while pos < bytes.len() {
            let tag = bytes[pos];
            pos += 1;
            if tag & 0x07 != 0 {
                return Err(Error::Encoding(format!(
                    "unsupported telemetry wire type in tag {:#04x}",
                    tag
                )));
            }
            let field = Field::from_number(tag >> 3).ok_or_else(|| {
                Error::Encoding(format!("unknown telemetry field in tag {:#04x}", tag))
            })?;
            let value = read_varint(bytes, &mut pos)?;
            snapshot.set(field, value)?;
        }
        Ok(snapshot)
    }
}
