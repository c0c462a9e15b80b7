// smarttag/src/llcp/pdu.rs

//! PDU header layout:
//!
//! ```text
//! byte 0: DSAP(6) | PTYPE(4) high 2 bits
//! byte 1: PTYPE low 2 bits | SSAP(6)
//! byte 2: N(S) << 4 | N(R)   (I and RR only)
//! ```

/// LLCP magic number opening the general bytes of ATR_REQ / ATR_RES.
pub const LLCP_MAGIC: [u8; 3] = [0x46, 0x66, 0x6d];

/// General bytes of our ATR_RES: magic, version 1.0, well-known services
/// 0x0013, link timeout 150 x 10ms.
pub const ATR_GENERAL_BYTES: [u8; 13] = [
    0x46, 0x66, 0x6d, 0x01, 0x01, 0x10, 0x03, 0x02, 0x00, 0x13, 0x04, 0x01, 0x96,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PduType {
    Symm = 0x0,
    Pax = 0x1,
    Connect = 0x4,
    Disc = 0x5,
    Cc = 0x6,
    Dm = 0x7,
    I = 0xc,
    Rr = 0xd,
}

impl PduType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x0 => Some(Self::Symm),
            0x1 => Some(Self::Pax),
            0x4 => Some(Self::Connect),
            0x5 => Some(Self::Disc),
            0x6 => Some(Self::Cc),
            0x7 => Some(Self::Dm),
            0xc => Some(Self::I),
            0xd => Some(Self::Rr),
            _ => None,
        }
    }

    /// Whether the header carries a sequence byte.
    pub fn is_sequenced(self) -> bool {
        matches!(self, Self::I | Self::Rr)
    }
}

/// Two byte header without sequence field.
pub fn header(ptype: PduType, dsap: u8, ssap: u8) -> [u8; 2] {
    let p = ptype as u8;
    [(dsap << 2) | (p >> 2), (p << 6) | (ssap & 0x3f)]
}

/// Raw PTYPE field, `None` for a PDU shorter than its header.
pub fn raw_ptype(pdu: &[u8]) -> Option<u8> {
    match pdu {
        [b0, b1, ..] => Some(((b0 & 0x03) << 2) | (b1 >> 6)),
        _ => None,
    }
}

pub fn ptype(pdu: &[u8]) -> Option<PduType> {
    raw_ptype(pdu).and_then(PduType::from_u8)
}

pub fn ssap(pdu: &[u8]) -> Option<u8> {
    pdu.get(1).map(|b| b & 0x3f)
}

/// Header length: 3 for I / RR, else 2.
pub fn header_len(pdu: &[u8]) -> usize {
    match ptype(pdu) {
        Some(t) if t.is_sequenced() => 3,
        _ => 2,
    }
}

/// Information field (everything after the header).
pub fn payload(pdu: &[u8]) -> &[u8] {
    pdu.get(header_len(pdu)..).unwrap_or(&[])
}

/// Whether ATR general bytes announce LLCP.
pub fn is_llcp_atr_req(general_bytes: &[u8]) -> bool {
    general_bytes.starts_with(&LLCP_MAGIC)
}
