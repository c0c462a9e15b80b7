// smarttag/src/records/felica_push.rs

//! Felica Push "launch browser" packet for phones polled in initiator mode.

use crate::protocol::checksum::neg_sum16;
use crate::records::{UrlSource, fetch_url};
use crate::types::Idm;
use crate::{Error, Result};

/// Felica Push command code
pub const FELICA_PUSH_CMD: u8 = 0xb0;
/// Felica Push response code
pub const FELICA_PUSH_RESP: u8 = 0xb1;

const BROWSER_LAUNCH: u8 = 0x02;

/// The leading length byte limits the whole packet.
const MAX_PACKET_LEN: usize = 255;

/// Build a Felica Push packet asking the phone `idm` to open a URL.
///
/// ```text
/// [len] b0 [idm 8] [data_len] 01 02 [param_len LE16] [url_len LE16] url label [cksum BE16]
/// ```
///
/// `len` counts the whole packet, `data_len` the bytes after it and the
/// checksum is `0 - sum(01 .. end of label) mod 2^16`.
pub fn felica_push_url(idm: &Idm, url: &mut dyn UrlSource, label: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(MAX_PACKET_LEN);
    out.push(0x00);
    out.push(FELICA_PUSH_CMD);
    out.extend_from_slice(idm.as_bytes());
    let data_len_idx = out.len();
    out.push(0x00);

    let block_idx = out.len();
    out.push(0x01); // one block
    out.push(BROWSER_LAUNCH);
    out.extend_from_slice(&[0x00, 0x00]); // param_len
    out.extend_from_slice(&[0x00, 0x00]); // url_len

    let fixed = out.len() + label.len() + 2;
    if fixed >= MAX_PACKET_LEN {
        return Err(Error::BufferExceeded {
            needed: fixed + 1,
            capacity: MAX_PACKET_LEN,
        });
    }
    let uri = fetch_url(url, MAX_PACKET_LEN - fixed)?;
    out.extend_from_slice(&uri);
    out.extend_from_slice(label);

    // both fit in u16: the packet is at most 255 bytes
    let url_len = uri.len() as u16;
    let param_len = (2 + uri.len() + label.len()) as u16;
    out[block_idx + 2..block_idx + 4].copy_from_slice(&param_len.to_le_bytes());
    out[block_idx + 4..block_idx + 6].copy_from_slice(&url_len.to_le_bytes());

    let cksum = neg_sum16(&out[block_idx..]);
    out.extend_from_slice(&cksum.to_be_bytes());

    out[data_len_idx] = (out.len() - data_len_idx - 1) as u8;
    out[0] = out.len() as u8;
    Ok(out)
}

/// Whether an InCommunicateThru reply acknowledges a Felica Push:
/// status 0, then the length-prefixed `b1` response.
pub fn is_felica_push_response(data: &[u8]) -> bool {
    matches!(data, [0x00, _, FELICA_PUSH_RESP, ..])
}
