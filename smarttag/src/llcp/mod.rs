// smarttag/src/llcp/mod.rs

//! Logical Link Control Protocol, service-initiator side only: connect,
//! deliver one NDEF message over SNEP (or NPP as fallback), disconnect.

pub mod delivery;
pub mod pdu;
pub mod session;

pub use delivery::{DeliveryMode, PushDelivery};
pub use pdu::{ATR_GENERAL_BYTES, PduType, is_llcp_atr_req};
pub use session::{LlcpSession, LlcpState};

/// Our service access point.
pub const LOCAL_SSAP: u8 = 0x20;
/// Service discovery SAP; CONNECT to it carries a service name.
pub const SAP_SDP: u8 = 0x01;
/// Well-known SNEP SAP.
pub const SAP_SNEP: u8 = 0x04;
