// smarttag/src/records/snep.rs

//! Simple NDEF Exchange Protocol (client side, PUT only).

use crate::protocol::parser::byte_at;
use crate::{Error, Result};

pub const SNEP_VERSION: u8 = 0x10;

pub const SNEP_REQ_PUT: u8 = 0x02;

pub const SNEP_RESP_SUCCESS: u8 = 0x81;
pub const SNEP_RESP_BAD_REQUEST: u8 = 0xc2;

const SNEP_HEADER_LEN: usize = 6;

/// `10 02 | len(BE32) | ndef`
pub fn snep_put(ndef: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(ndef.len()).map_err(|_| Error::BufferExceeded {
        needed: ndef.len(),
        capacity: u32::MAX as usize,
    })?;
    let mut out = Vec::with_capacity(SNEP_HEADER_LEN + ndef.len());
    out.push(SNEP_VERSION);
    out.push(SNEP_REQ_PUT);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(ndef);
    Ok(out)
}

/// Status byte of a SNEP response (second byte).
pub fn snep_response_status(resp: &[u8]) -> Result<u8> {
    byte_at(resp, 1)
}
