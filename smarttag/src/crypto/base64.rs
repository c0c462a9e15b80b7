// smarttag/src/crypto/base64.rs

//! Web-safe base64 (`-` and `_` instead of `+` and `/`) without padding.

use crate::{Error, Result};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Number of characters produced for `n` input bytes: `ceil(8n / 6)`.
pub const fn encoded_len(n: usize) -> usize {
    (n * 8).div_ceil(6)
}

/// Encode `input` into `out` followed by a NUL terminator.
///
/// Returns the number of characters written, terminator excluded. When
/// `out` cannot hold `encoded_len(input.len()) + 1` bytes nothing is
/// written and `BufferExceeded` is returned.
pub fn encode_into(input: &[u8], out: &mut [u8]) -> Result<usize> {
    let len = encoded_len(input.len());
    if out.len() < len + 1 {
        return Err(Error::BufferExceeded {
            needed: len + 1,
            capacity: out.len(),
        });
    }

    let mut j = 0;
    for chunk in input.chunks(3) {
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied().unwrap_or(0);
        let b2 = chunk.get(2).copied().unwrap_or(0);
        let sextets = [
            b0 >> 2,
            ((b0 & 0x03) << 4) | (b1 >> 4),
            ((b1 & 0x0f) << 2) | (b2 >> 6),
            b2 & 0x3f,
        ];
        for &s in &sextets[..chunk.len() + 1] {
            out[j] = ALPHABET[s as usize];
            j += 1;
        }
    }
    out[j] = 0;
    Ok(j)
}

/// Encode into a `String`, enforcing the same capacity rule as
/// [`encode_into`] (terminator counted).
pub fn encode(input: &[u8], capacity: usize) -> Result<String> {
    let mut buf = vec![0u8; capacity];
    let n = encode_into(input, &mut buf)?;
    buf.truncate(n);
    // alphabet is ASCII
    String::from_utf8(buf).map_err(|e| Error::Encoding(e.to_string()))
}

fn sextet(c: u8) -> Result<u8> {
    match c {
        b'A'..=b'Z' => Ok(c - b'A'),
        b'a'..=b'z' => Ok(c - b'a' + 26),
        b'0'..=b'9' => Ok(c - b'0' + 52),
        b'-' => Ok(62),
        b'_' => Ok(63),
        _ => Err(Error::Encoding(format!("invalid base64 character {:?}", c as char))),
    }
}

/// Decode unpadded web-safe base64.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    if bytes.len() % 4 == 1 {
        return Err(Error::Encoding(format!(
            "invalid base64 length {}",
            bytes.len()
        )));
    }

    let mut out = Vec::with_capacity(bytes.len() * 3 / 4);
    for group in bytes.chunks(4) {
        let mut v = [0u8; 4];
        for (slot, &c) in v.iter_mut().zip(group) {
            *slot = sextet(c)?;
        }
        let unused = match group.len() {
            2 => v[1] & 0x0f,
            3 => v[2] & 0x03,
            _ => 0,
        };
        if unused != 0 {
            return Err(Error::Encoding("non-canonical base64 tail".into()));
        }
        let decoded = [
            (v[0] << 2) | (v[1] >> 4),
            (v[1] << 4) | (v[2] >> 2),
            (v[2] << 6) | v[3],
        ];
        out.extend_from_slice(&decoded[..group.len() - 1]);
    }
    Ok(out)
}
