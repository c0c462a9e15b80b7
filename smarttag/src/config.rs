// smarttag/src/config.rs

//! Station configuration. `Default` reproduces the firmware constants.

use crate::constants::{
    MAX_TARGET_LOOP_TIMES, NUM_RETRY_INITIATOR_LOOP, POSTER_LABEL, PUSH_COMM_TIMEOUT_MS,
    PUSH_LABEL_SJIS, TARGET_MODE_RETRY, TG_COMM_TIMEOUT_MS, TG_INIT_WAIT_MS, URL_CAPACITY,
    URL_PREFIX, URL_VERSION,
};
use crate::types::Idm;
use crate::url::MIN_SEALED_LEN;
use crate::utils::DEFAULT_READ_TIMEOUT_MS;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct StationConfig {
    pub url_prefix: String,
    pub url_version: u8,
    /// Whole URL including terminator.
    pub url_capacity: usize,
    /// Browser label of a Felica Push, already in the phone's encoding.
    pub push_label: Vec<u8>,
    /// Title record of the Smart Poster; `None` sends a bare URI.
    pub poster_label: Option<String>,
    pub target_retry: usize,
    pub target_loop_times: usize,
    pub tg_comm_timeout_ms: u64,
    pub initiator_wait_ms: u64,
    pub response_timeout_ms: u64,
    pub initiator_retries: usize,
    pub push_timeout_ms: u64,
    /// Fixed IDm for card emulation; random per session when `None`.
    pub card_idm: Option<Idm>,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            url_prefix: URL_PREFIX.to_string(),
            url_version: URL_VERSION,
            url_capacity: URL_CAPACITY,
            push_label: PUSH_LABEL_SJIS.to_vec(),
            poster_label: Some(POSTER_LABEL.to_string()),
            target_retry: TARGET_MODE_RETRY,
            target_loop_times: MAX_TARGET_LOOP_TIMES,
            tg_comm_timeout_ms: TG_COMM_TIMEOUT_MS,
            initiator_wait_ms: TG_INIT_WAIT_MS,
            response_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            initiator_retries: NUM_RETRY_INITIATOR_LOOP,
            push_timeout_ms: PUSH_COMM_TIMEOUT_MS,
            card_idm: None,
        }
    }
}

impl StationConfig {
    pub fn builder() -> StationConfigBuilder {
        StationConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        let shortest = self.url_prefix.len() + crate::crypto::base64::encoded_len(MIN_SEALED_LEN) + 1;
        if self.url_capacity < shortest {
            return Err(Error::Config(format!(
                "url_capacity {} cannot hold a {} byte url",
                self.url_capacity, shortest
            )));
        }
        if self.target_retry == 0 || self.target_loop_times == 0 {
            return Err(Error::Config("loop budgets must be at least 1".into()));
        }
        Ok(())
    }
}

/// Builder for [`StationConfig`], starting from the defaults.
#[derive(Debug, Default)]
pub struct StationConfigBuilder {
    config: StationConfig,
}

impl StationConfigBuilder {
    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.url_prefix = prefix.into();
        self
    }

    pub fn url_version(mut self, version: u8) -> Self {
        self.config.url_version = version;
        self
    }

    pub fn url_capacity(mut self, capacity: usize) -> Self {
        self.config.url_capacity = capacity;
        self
    }

    pub fn push_label(mut self, label: impl Into<Vec<u8>>) -> Self {
        self.config.push_label = label.into();
        self
    }

    pub fn poster_label(mut self, label: Option<String>) -> Self {
        self.config.poster_label = label;
        self
    }

    pub fn target_retry(mut self, n: usize) -> Self {
        self.config.target_retry = n;
        self
    }

    pub fn target_loop_times(mut self, n: usize) -> Self {
        self.config.target_loop_times = n;
        self
    }

    pub fn initiator_retries(mut self, n: usize) -> Self {
        self.config.initiator_retries = n;
        self
    }

    pub fn card_idm(mut self, idm: Idm) -> Self {
        self.config.card_idm = Some(idm);
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<StationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
