// smarttag/src/store/mod.rs

//! Persistent station state: identity, URL counter and telemetry.
//!
//! On the device this lives in EEPROM; the library only needs the small
//! synchronous surface below.

pub mod memory;

pub use memory::{MemoryStore, SharedStore};

use crate::Result;
use crate::types::StationIdentity;
use crate::url::TelemetrySnapshot;

pub trait StationStore {
    /// Provisioned identity. Fails with `NotProvisioned` before provisioning.
    fn station_identity(&self) -> Result<StationIdentity>;

    /// Advance the URL counter and return the new value.
    ///
    /// Read, increment and write-back happen as one step; a value handed
    /// out once is never handed out again for the same identity.
    fn increment_counter(&mut self) -> Result<u32>;

    /// Current telemetry counters.
    fn telemetry(&self) -> Result<TelemetrySnapshot>;

    /// Note a failed exchange with the front-end.
    fn record_serial_failure(&mut self) -> Result<()> {
        Ok(())
    }
}
