// smarttag/src/records/smart_poster.rs

//! NDEF Smart Poster (`Sp`) with an optional English title.

use crate::records::{UrlSource, fetch_url};
use crate::{Error, Result};

/// Record header + type of the outer `Sp` record.
const SP_HEADER_LEN: usize = 5;
/// Short-record payload length limit.
const SR_MAX_PAYLOAD: usize = 255;
/// URI record header: flags, type length, payload length, 'U', identifier code.
const URI_HEADER_LEN: usize = 5;

/// Build a Smart Poster holding a Text record (when `label` is given) and a
/// URI record without abbreviation.
pub fn smart_poster(label: Option<&str>, url: &mut dyn UrlSource) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(SP_HEADER_LEN + SR_MAX_PAYLOAD);
    // MB|ME|SR, TNF well-known, type "Sp"
    out.extend_from_slice(&[0xd1, 0x02, 0x00, b'S', b'p']);

    match label {
        Some(label) => {
            let text = label.as_bytes();
            let text_len = text.len() + 3;
            // text record plus URI header must leave room for one URL byte
            let fixed = 4 + text_len + URI_HEADER_LEN;
            if fixed >= SR_MAX_PAYLOAD {
                return Err(Error::BufferExceeded {
                    needed: fixed + 1,
                    capacity: SR_MAX_PAYLOAD,
                });
            }
            // MB|SR, type "T", status byte: UTF-8, language length 2
            out.extend_from_slice(&[0x91, 0x01, text_len as u8, b'T', 0x02, b'e', b'n']);
            out.extend_from_slice(text);
            // ME|SR for the URI record
            out.push(0x51);
        }
        None => out.push(0xd1),
    }

    out.push(0x01);
    let url_len_idx = out.len();
    out.extend_from_slice(&[0x00, b'U', 0x00]);

    let room = SR_MAX_PAYLOAD - (out.len() - SP_HEADER_LEN);
    let uri = fetch_url(url, room)?;
    out.extend_from_slice(&uri);

    out[url_len_idx] = (uri.len() + 1) as u8;
    out[2] = (out.len() - SP_HEADER_LEN) as u8;
    Ok(out)
}
