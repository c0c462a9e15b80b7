// smarttag/src/station/target.rs

//! Target mode: the station waits to be polled and serves its Smart
//! Poster either as a Type-3 tag (FeliCa) or over LLCP (ISO 18092 DEP).

use derive_more::Display;
use log::{debug, warn};

use crate::device::rcs956::{
    REG_TARGET_106K, REG_TARGET_CONFIG, STATUS_CLOSED, TARGET_PARAMETERS,
};
use crate::llcp::{ATR_GENERAL_BYTES, PushDelivery, is_llcp_atr_req};
use crate::station::Station;
use crate::store::StationStore;
use crate::type3::Type3Responder;
use crate::types::Idm;
use crate::{Error, Result};

/// Analog settings written before entering target mode.
const TARGET_CONFIG_DEFAULT: u8 = 0x08;
/// Values turning off the 106 kbps target optimisation.
const TARGET_CONFIG_106K: u8 = 0x00;
const TARGET_106K_SETTING: u8 = 0x3b;

/// Target type in the low bits of the activation mode byte.
const TARGET_TYPE_DEP: u8 = 1;
const TARGET_TYPE_FELICA: u8 = 2;

/// NFCIP-1 ATR_REQ: `len d4 00 nfcid3(10) did bs br pp [general bytes]`
const ATR_REQ: [u8; 2] = [0xd4, 0x00];
const ATR_REQ_MIN_LEN: u8 = 14;
const ATR_REQ_GENERAL_BYTES: usize = 18;
/// NFCIP-1 RLS_REQ `len d4 0a did` and its response code.
const RLS_REQ: [u8; 2] = [0xd4, 0x0a];
const RLS_RES: [u8; 2] = [0xd5, 0x0b];

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum TargetOutcome {
    /// An initiator read the whole record.
    #[display(fmt = "complete")]
    Complete,
    /// Nobody polled us.
    #[display(fmt = "timeout")]
    Timeout,
    /// The front-end misbehaved or the URL could not be built.
    #[display(fmt = "error")]
    Error,
    /// An initiator showed up but did not finish; worth another attempt.
    #[display(fmt = "retry")]
    Retry,
}

impl<S: StationStore> Station<S> {
    /// Run target sessions until one is not `Retry`, at most
    /// `target_retry` times, resetting the front-end before each.
    pub fn run_target_cycle(&mut self) -> TargetOutcome {
        let mut outcome = TargetOutcome::Retry;
        for attempt in 1..=self.config.target_retry {
            if let Err(e) = self.device.reset() {
                warn!("target: reset failed: {}", e);
                self.note_failure(&e);
                return TargetOutcome::Error;
            }
            outcome = self.run_target_session();
            debug!("target: attempt {} -> {}", attempt, outcome);
            if outcome != TargetOutcome::Retry {
                break;
            }
        }
        outcome
    }

    /// One target session with a fresh IDm. Errors become
    /// [`TargetOutcome::Error`]; a transport timeout is also recorded as a
    /// serial failure in the store.
    pub fn run_target_session(&mut self) -> TargetOutcome {
        match self.target_session() {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("target: session failed: {}", e);
                self.note_failure(&e);
                TargetOutcome::Error
            }
        }
    }

    fn target_session(&mut self) -> Result<TargetOutcome> {
        let idm = match self.config.card_idm {
            Some(idm) => idm,
            None => Idm::random()?,
        };

        self.device.write_register(REG_TARGET_CONFIG, TARGET_CONFIG_DEFAULT)?;
        self.device.set_parameters(TARGET_PARAMETERS)?;
        self.device.tg_init_as_target(&idm)?;

        let Some(activation) = self.device.wait_for_initiator(self.config.initiator_wait_ms)? else {
            return Ok(TargetOutcome::Timeout);
        };
        let mode = crate::protocol::parser::byte_at(&activation, 0)?;
        let target_type = mode & 0x03;
        debug!("target: activated, mode {:#04x}", mode);

        if mode & 0x70 == 0 {
            self.device.write_register(REG_TARGET_CONFIG, TARGET_CONFIG_106K)?;
            self.device.write_register(REG_TARGET_106K, TARGET_106K_SETTING)?;
        }

        let len = activation.get(1).copied().unwrap_or(0);
        let request = activation.get(2..4).unwrap_or(&[]);

        if len >= ATR_REQ_MIN_LEN && request == ATR_REQ {
            let general = activation.get(ATR_REQ_GENERAL_BYTES..).unwrap_or(&[]);
            if len > 17 && is_llcp_atr_req(general) {
                debug!("target: initiator speaks llcp");
                self.device.tg_set_general_bytes(&ATR_GENERAL_BYTES)?;
            } else {
                self.device.tg_set_general_bytes(&[])?;
            }
        }

        if len >= 3 && request == RLS_REQ {
            let did = activation.get(4).copied().unwrap_or(0);
            let release = [3, RLS_RES[0], RLS_RES[1], did];
            self.device.comm_thru_ex(&release, 0)?;
            debug!("target: released by initiator");
            return Ok(TargetOutcome::Retry);
        }

        let served = match target_type {
            TARGET_TYPE_DEP => {
                let poster = self.poster()?;
                self.llcp_service(poster)?
            }
            TARGET_TYPE_FELICA => {
                let poster = self.poster()?;
                self.felica_service(idm, &poster, activation)?
            }
            other => {
                debug!("target: unsupported target type {}", other);
                false
            }
        };

        Ok(if served {
            TargetOutcome::Complete
        } else {
            TargetOutcome::Retry
        })
    }

    /// Answer Type-3 commands until the record's last block was read.
    /// `data` is the front-end reply carrying the first command.
    fn felica_service(&mut self, idm: Idm, record: &[u8], mut data: Vec<u8>) -> Result<bool> {
        let responder = Type3Responder::new(idm);
        let timeout = u16::try_from(self.config.tg_comm_timeout_ms).unwrap_or(u16::MAX);

        for _ in 0..self.config.target_loop_times {
            // skip status and length bytes
            let command = data.get(2..).unwrap_or(&[]);
            let reply = match responder.respond(command, record) {
                Ok(reply) if !reply.response.is_empty() => reply,
                Ok(_) => return Ok(false),
                Err(Error::ProtocolReject(_) | Error::InvalidLength { .. }) => return Ok(false),
                Err(e) => return Err(e),
            };

            data = self.device.comm_thru_ex(&reply.response, timeout)?;
            if data.first() == Some(&STATUS_CLOSED) {
                debug!("target: initiator closed the session");
                return Ok(false);
            }
            if reply.read_complete {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Push `ndef` over LLCP with SNEP, or NPP when SNEP is refused.
    fn llcp_service(&mut self, ndef: Vec<u8>) -> Result<bool> {
        let mut delivery = PushDelivery::new(ndef);

        for _ in 0..self.config.target_loop_times {
            let data = self.device.tg_get_dep_data()?;
            if data.first() != Some(&0x00) || data.len() < 3 {
                warn!("llcp: dep status {:?}", data.first());
                return Ok(false);
            }

            let cmd = match delivery.on_pdu(&data[1..]) {
                Ok(cmd) => cmd,
                Err(Error::ProtocolReject(msg)) => {
                    warn!("llcp: {}", msg);
                    return Ok(false);
                }
                Err(e) => return Err(e),
            };
            if !cmd.is_empty() {
                self.device.tg_set_dep_data(&cmd)?;
            }
            if delivery.is_done() {
                break;
            }
        }
        debug!("llcp: delivery via {} success={}", delivery.mode(), delivery.succeeded());
        Ok(delivery.succeeded())
    }
}
