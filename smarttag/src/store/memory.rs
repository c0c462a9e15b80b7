// smarttag/src/store/memory.rs

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use crate::store::StationStore;
use crate::types::StationIdentity;
use crate::url::TelemetrySnapshot;
use crate::{Error, Result};

/// In-memory station state, used by hosts without EEPROM and by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    identity: Option<StationIdentity>,
    counter: u32,
    telemetry: TelemetrySnapshot,
}

impl MemoryStore {
    /// Unprovisioned store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provisioned(identity: StationIdentity) -> Self {
        Self {
            identity: Some(identity),
            ..Self::default()
        }
    }

    /// Start from a previously persisted counter value.
    pub fn with_counter(mut self, counter: u32) -> Self {
        self.counter = counter;
        self
    }

    pub fn with_telemetry(mut self, telemetry: TelemetrySnapshot) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Install the identity. An identity is written once; re-provisioning
    /// is refused.
    pub fn provision(&mut self, identity: StationIdentity) -> Result<()> {
        if self.identity.is_some() {
            return Err(Error::Config("station identity already provisioned".into()));
        }
        debug!("provisioned station {}", identity.station_id);
        self.identity = Some(identity);
        Ok(())
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }
}

impl StationStore for MemoryStore {
    fn station_identity(&self) -> Result<StationIdentity> {
        self.identity.clone().ok_or(Error::NotProvisioned)
    }

    fn increment_counter(&mut self) -> Result<u32> {
        self.counter = self.counter.checked_add(1).ok_or(Error::CounterExhausted)?;
        Ok(self.counter)
    }

    fn telemetry(&self) -> Result<TelemetrySnapshot> {
        Ok(self.telemetry)
    }

    fn record_serial_failure(&mut self) -> Result<()> {
        let n = self.telemetry.serial_failures.unwrap_or(0);
        self.telemetry.serial_failures = Some(n.saturating_add(1));
        Ok(())
    }
}

/// Store shared between threads. Every call holds the lock for its whole
/// duration, so counter increments never interleave.
#[derive(Debug, Default)]
pub struct SharedStore<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StationStore> SharedStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    // A panic while holding the lock cannot leave the counter half-written,
    // so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` with exclusive access to the wrapped store.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.lock())
    }
}

impl<S: StationStore> StationStore for SharedStore<S> {
    fn station_identity(&self) -> Result<StationIdentity> {
        self.lock().station_identity()
    }

    fn increment_counter(&mut self) -> Result<u32> {
        self.lock().increment_counter()
    }

    fn telemetry(&self) -> Result<TelemetrySnapshot> {
        self.lock().telemetry()
    }

    fn record_serial_failure(&mut self) -> Result<()> {
        self.lock().record_serial_failure()
    }
}
