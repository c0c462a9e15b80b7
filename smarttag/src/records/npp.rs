// smarttag/src/records/npp.rs

//! NDEF Push Protocol, the pre-SNEP Android push service.

use crate::{Error, Result};

/// LLCP service name of NPP
pub const NPP_SERVICE_NAME: &str = "com.android.npp";

const NPP_VERSION: u8 = 0x01;
const NPP_ACTION_PUSH: u8 = 0x01;

/// `01 | entries(BE32) = 1 | action 01 | ndef_len(BE32) | ndef`
pub fn npp(ndef: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(ndef.len()).map_err(|_| Error::BufferExceeded {
        needed: ndef.len(),
        capacity: u32::MAX as usize,
    })?;
    let mut out = Vec::with_capacity(10 + ndef.len());
    out.push(NPP_VERSION);
    out.extend_from_slice(&1u32.to_be_bytes());
    out.push(NPP_ACTION_PUSH);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(ndef);
    Ok(out)
}
