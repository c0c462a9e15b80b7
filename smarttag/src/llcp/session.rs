// smarttag/src/llcp/session.rs

use derive_more::Display;
use log::debug;

use crate::llcp::pdu::{self, PduType};
use crate::llcp::{LOCAL_SSAP, SAP_SDP};

/// Service name TLV type in CONNECT
const PARAM_SN: u8 = 0x06;
/// DM reason: connection refused
const DM_REASON_REJECTED: u8 = 0x11;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum LlcpState {
    #[display(fmt = "init")]
    Init,
    #[display(fmt = "conn-pending")]
    ConnPending,
    #[display(fmt = "connected")]
    Connected,
    #[display(fmt = "confirmed")]
    Confirmed,
    #[display(fmt = "disconnecting")]
    Disconnecting,
    #[display(fmt = "done")]
    Done,
    #[display(fmt = "reject")]
    Reject,
}

/// One LLCP connection attempt. A new session is created per target
/// session; nothing carries over between sessions.
#[derive(Debug, Clone)]
pub struct LlcpSession {
    state: LlcpState,
    dsap: u8,
    service_name: Option<String>,
}

impl LlcpSession {
    /// Connect to a well-known SAP.
    pub fn well_known(sap: u8) -> Self {
        Self {
            state: LlcpState::Init,
            dsap: sap,
            service_name: None,
        }
    }

    /// Connect by service name through the discovery SAP.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            state: LlcpState::Init,
            dsap: SAP_SDP,
            service_name: Some(name.into()),
        }
    }

    pub fn state(&self) -> LlcpState {
        self.state
    }

    /// Peer SAP (updated from CC).
    pub fn dsap(&self) -> u8 {
        self.dsap
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, LlcpState::Done | LlcpState::Reject)
    }

    /// Treat the data exchange as acknowledged; next step disconnects.
    pub(crate) fn confirm(&mut self) {
        self.transition(LlcpState::Confirmed);
    }

    fn transition(&mut self, next: LlcpState) {
        debug!("llcp: {} -> {}", self.state, next);
        self.state = next;
    }

    fn service_pdu(&self, ptype: PduType) -> Vec<u8> {
        pdu::header(ptype, self.dsap, LOCAL_SSAP).to_vec()
    }

    fn symm() -> Vec<u8> {
        pdu::header(PduType::Symm, 0, 0).to_vec()
    }

    /// Next PDU to send after receiving `received`. An empty result means
    /// nothing to send. Callers append the information field to an I PDU.
    pub fn next_command(&mut self, received: &[u8]) -> Vec<u8> {
        let ptype = pdu::ptype(received);
        match self.state {
            LlcpState::Init => match ptype {
                Some(PduType::Connect) => {
                    // the peer wants to connect to us; we only initiate
                    let mut cmd = self.service_pdu(PduType::Dm);
                    cmd.push(DM_REASON_REJECTED);
                    self.transition(LlcpState::Done);
                    cmd
                }
                _ => {
                    let mut cmd = self.service_pdu(PduType::Connect);
                    if let Some(name) = self.service_name.as_deref().filter(|_| self.dsap == SAP_SDP) {
                        let name = &name.as_bytes()[..name.len().min(u8::MAX as usize)];
                        cmd.push(PARAM_SN);
                        cmd.push(name.len() as u8);
                        cmd.extend_from_slice(name);
                    }
                    self.transition(LlcpState::ConnPending);
                    cmd
                }
            },

            LlcpState::ConnPending => match ptype {
                Some(PduType::Cc) => {
                    if let Some(sap) = pdu::ssap(received) {
                        self.dsap = sap;
                    }
                    let mut cmd = self.service_pdu(PduType::I);
                    cmd.push(0x00); // N(S) = 0, N(R) = 0
                    self.transition(LlcpState::Connected);
                    cmd
                }
                Some(PduType::Symm) => Self::symm(),
                Some(PduType::Dm) => {
                    debug!(
                        "llcp: connect refused, reason {:?}",
                        pdu::payload(received).first()
                    );
                    self.transition(LlcpState::Reject);
                    Vec::new()
                }
                _ => Vec::new(),
            },

            LlcpState::Connected => match ptype {
                Some(PduType::I) => {
                    let ns = received.get(2).map_or(0, |seq| seq >> 4);
                    let mut cmd = self.service_pdu(PduType::Rr);
                    cmd.push((ns + 1) & 0x0f);
                    self.transition(LlcpState::Confirmed);
                    cmd
                }
                Some(PduType::Rr) | Some(PduType::Symm) => Self::symm(),
                _ => Vec::new(),
            },

            LlcpState::Confirmed => {
                let cmd = self.service_pdu(PduType::Disc);
                self.transition(LlcpState::Disconnecting);
                cmd
            }

            LlcpState::Disconnecting => {
                if ptype == Some(PduType::Dm) {
                    self.transition(LlcpState::Done);
                }
                Vec::new()
            }

            LlcpState::Done | LlcpState::Reject => Vec::new(),
        }
    }
}
