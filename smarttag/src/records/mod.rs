// smarttag/src/records/mod.rs

//! Payloads pushed to a phone: NDEF Smart Poster, Felica Push and the
//! SNEP / NPP envelopes carrying NDEF over LLCP.

pub mod felica_push;
pub mod npp;
pub mod smart_poster;
pub mod snep;

pub use felica_push::{felica_push_url, is_felica_push_response};
pub use npp::{NPP_SERVICE_NAME, npp};
pub use smart_poster::smart_poster;
pub use snep::{snep_put, snep_response_status};

use crate::{Error, Result};

/// Supplies the URL embedded in a record.
///
/// `produce` writes the URL into `buf` (it may append a NUL terminator
/// when room allows) and returns the URL length.
pub trait UrlSource {
    fn produce(&mut self, buf: &mut [u8]) -> Result<usize>;
}

impl<F> UrlSource for F
where
    F: FnMut(&mut [u8]) -> Result<usize>,
{
    fn produce(&mut self, buf: &mut [u8]) -> Result<usize> {
        self(buf)
    }
}

/// Run `source` against a scratch buffer of `room` bytes plus terminator
/// and return the URL bytes.
pub(crate) fn fetch_url(source: &mut dyn UrlSource, room: usize) -> Result<Vec<u8>> {
    let mut scratch = vec![0u8; room + 1];
    let n = source.produce(&mut scratch)?;
    if n == 0 {
        return Err(Error::UrlUnavailable);
    }
    if n > room {
        return Err(Error::BufferExceeded {
            needed: n,
            capacity: room,
        });
    }
    scratch.truncate(n);
    Ok(scratch)
}

/// Fixed URL, mostly for tests and demos.
pub fn static_url(url: &str) -> impl FnMut(&mut [u8]) -> Result<usize> + '_ {
    move |buf: &mut [u8]| {
        let bytes = url.as_bytes();
        if bytes.len() > buf.len() {
            return Err(Error::BufferExceeded {
                needed: bytes.len(),
                capacity: buf.len(),
            });
        }
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }
}
