// smarttag/src/llcp/delivery.rs

use derive_more::Display;
use log::{debug, warn};

use crate::llcp::pdu;
use crate::llcp::{LlcpSession, LlcpState, SAP_SNEP};
use crate::records::snep::SNEP_RESP_SUCCESS;
use crate::records::{NPP_SERVICE_NAME, npp, snep_put, snep_response_status};
use crate::{Error, Result};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    #[display(fmt = "snep")]
    Snep,
    #[display(fmt = "npp")]
    Npp,
}

/// Pushes one NDEF message over LLCP. Tries SNEP first and falls back to
/// NPP when the peer refuses the SNEP connection.
#[derive(Debug, Clone)]
pub struct PushDelivery {
    session: LlcpSession,
    mode: DeliveryMode,
    ndef: Vec<u8>,
    success: bool,
}

impl PushDelivery {
    pub fn new(ndef: Vec<u8>) -> Self {
        Self {
            session: LlcpSession::well_known(SAP_SNEP),
            mode: DeliveryMode::Snep,
            ndef,
            success: false,
        }
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    pub fn state(&self) -> LlcpState {
        self.session.state()
    }

    /// Whether the peer accepted the message.
    pub fn succeeded(&self) -> bool {
        self.success
    }

    pub fn is_done(&self) -> bool {
        self.session.is_finished()
    }

    /// Feed one received PDU, return the PDU to send back (possibly empty).
    pub fn on_pdu(&mut self, received: &[u8]) -> Result<Vec<u8>> {
        let before = self.session.state();
        let mut cmd = self.session.next_command(received);

        if self.session.state() == LlcpState::Reject {
            match self.mode {
                DeliveryMode::Snep => {
                    debug!("llcp: snep refused, falling back to npp");
                    self.mode = DeliveryMode::Npp;
                    self.session = LlcpSession::by_name(NPP_SERVICE_NAME);
                    return self.on_pdu(received);
                }
                DeliveryMode::Npp => {
                    return Err(Error::ProtocolReject("npp connection refused".into()));
                }
            }
        }

        let after = self.session.state();
        match (self.mode, before, after) {
            (DeliveryMode::Snep, LlcpState::ConnPending, LlcpState::Connected) => {
                cmd.extend_from_slice(&snep_put(&self.ndef)?);
            }
            (DeliveryMode::Snep, LlcpState::Connected, LlcpState::Confirmed) => {
                match snep_response_status(pdu::payload(received)) {
                    Ok(SNEP_RESP_SUCCESS) => self.success = true,
                    Ok(status) => warn!("snep: put answered with {:#04x}", status),
                    Err(_) => warn!("snep: truncated response"),
                }
            }
            (DeliveryMode::Npp, LlcpState::ConnPending, LlcpState::Connected) => {
                // NPP has no response message
                cmd.extend_from_slice(&npp(&self.ndef)?);
                self.success = true;
                self.session.confirm();
            }
            _ => {}
        }
        Ok(cmd)
    }
}
