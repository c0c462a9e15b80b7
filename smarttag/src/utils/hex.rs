//! Hexadecimal helpers used for logging and display.
//!
//! `Hex` formats lazily, so wrapping a frame in `trace!("{}", Hex(&frame))`
//! costs nothing when the log level is disabled.

use std::fmt;

use crate::{Error, Result};

/// Display adapter rendering bytes as spaced lowercase hex (`"de ad"`).
#[derive(Clone, Copy)]
pub struct Hex<'a>(pub &'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Example: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    Hex(bytes).to_string()
}

/// Parse a hex string into bytes. ASCII whitespace is ignored.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = s.bytes().filter(|c| !c.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(Error::Encoding("hex string has odd length".into()));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair)
                .map_err(|_| Error::Encoding("non-ascii hex digit".into()))?;
            u8::from_str_radix(text, 16)
                .map_err(|e| Error::Encoding(format!("invalid hex pair '{}': {}", text, e)))
        })
        .collect()
}
