// smarttag/src/station/initiator.rs

//! Initiator mode: poll for a phone and push it a one-time URL with
//! Felica Push.

use log::{debug, warn};

use crate::records::{felica_push_url, is_felica_push_response};
use crate::station::Station;
use crate::store::StationStore;
use crate::types::{Idm, SystemCode};
use crate::url::StationUrl;
use crate::Result;

/// Polling retries of the front-end per InListPassiveTarget.
const NUM_RETRY_POLL: u8 = 2;
/// Communication retries.
const NUM_RETRY_COMM: u8 = 0;
/// `50us * 2^(0x0d - 1)`, about 400 ms.
const TIMEOUT_STYLE: u8 = 0x0d;

impl<S: StationStore> Station<S> {
    /// RF off, poll/communication retries and timeout used in initiator mode.
    pub fn apply_initiator_defaults(&mut self) -> Result<()> {
        self.device.rf_off()?;
        self.device.set_retry(NUM_RETRY_POLL)?;
        self.device.set_retry_com(NUM_RETRY_COMM)?;
        self.device.set_timeout(TIMEOUT_STYLE)
    }

    /// Poll for a phone and push it a URL. Returns `true` once a phone
    /// acknowledged the push, `false` when none answered the poll or all
    /// attempts failed.
    ///
    /// A phone that stays in the field keeps getting the same packet, so a
    /// retry does not burn another counter value.
    pub fn run_initiator(&mut self) -> Result<bool> {
        self.apply_initiator_defaults()?;

        let mut last: Option<(Idm, Vec<u8>)> = None;
        for attempt in 0..=self.config.initiator_retries {
            let Some((idm, _pmm)) = self.device.in_list_passive_target(SystemCode::MOBILE)? else {
                debug!("initiator: no phone");
                break;
            };
            debug!("initiator: phone {} (attempt {})", idm.to_hex(), attempt);

            let packet = match &last {
                Some((prev, packet)) if *prev == idm => packet.clone(),
                _ => {
                    let mut url = StationUrl::new(&self.urls, &mut self.store, Some(idm));
                    let packet = match felica_push_url(&idm, &mut url, &self.config.push_label) {
                        Ok(packet) => packet,
                        Err(e) => {
                            self.device.rf_off()?;
                            return Err(e);
                        }
                    };
                    last = Some((idm, packet.clone()));
                    packet
                }
            };

            let pushed = match self
                .device
                .in_communicate_thru(&packet, self.config.push_timeout_ms)
            {
                Ok(data) => is_felica_push_response(&data),
                Err(e) => {
                    warn!("initiator: push failed: {}", e);
                    false
                }
            };
            // phones keep a stale state unless the field drops
            self.device.rf_off()?;

            if pushed {
                debug!("initiator: pushed to {}", idm.to_hex());
                return Ok(true);
            }
        }
        Ok(false)
    }
}
