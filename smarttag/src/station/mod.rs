// smarttag/src/station/mod.rs

//! The base station: one RC-S956 front-end, one persistent store and the
//! configuration, driven through initiator and target cycles.

pub mod initiator;
pub mod target;

pub use target::TargetOutcome;

use log::{debug, warn};

use crate::config::StationConfig;
use crate::device::{Device, Initialized};
use crate::records::smart_poster;
use crate::store::StationStore;
use crate::url::{StationUrl, UrlBuilder};
use crate::{Error, Result};

/// What one [`Station::run_cycle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// A phone acknowledged a Felica Push.
    pub pushed: bool,
    /// Outcome of the target cycle.
    pub target: TargetOutcome,
}

pub struct Station<S: StationStore> {
    device: Device<Initialized>,
    store: S,
    config: StationConfig,
    urls: UrlBuilder,
}

impl<S: StationStore> Station<S> {
    pub fn new(mut device: Device<Initialized>, store: S, config: StationConfig) -> Result<Self> {
        config.validate()?;
        device.set_response_timeout_ms(config.response_timeout_ms);
        let urls = UrlBuilder::from_config(&config);
        Ok(Self {
            device,
            store,
            config,
            urls,
        })
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn device_mut(&mut self) -> &mut Device<Initialized> {
        &mut self.device
    }

    pub fn url_builder(&self) -> &UrlBuilder {
        &self.urls
    }

    pub fn into_parts(self) -> (Device<Initialized>, S, StationConfig) {
        (self.device, self.store, self.config)
    }

    /// Smart Poster served in card emulation and over LLCP.
    fn poster(&mut self) -> Result<Vec<u8>> {
        let mut url = StationUrl::new(&self.urls, &mut self.store, None);
        smart_poster(self.config.poster_label.as_deref(), &mut url)
    }

    /// Book-keeping after a failed exchange with the front-end.
    fn note_failure(&mut self, err: &Error) {
        if matches!(err, Error::Timeout) {
            if let Err(e) = self.store.record_serial_failure() {
                warn!("could not record serial failure: {}", e);
            }
        }
    }

    /// One pass of the main loop: push to a phone in initiator mode, then
    /// offer the tag in target mode.
    pub fn run_cycle(&mut self) -> CycleReport {
        let pushed = match self.run_initiator() {
            Ok(pushed) => pushed,
            Err(e) => {
                warn!("initiator failed: {}", e);
                self.note_failure(&e);
                false
            }
        };
        let target = self.run_target_cycle();
        debug!("cycle: pushed={} target={}", pushed, target);
        CycleReport { pushed, target }
    }
}
