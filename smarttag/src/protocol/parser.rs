// smarttag/src/protocol/parser.rs

//! Bounds-checked readers for received packets.

use crate::types::{Idm, Pmm};
use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

pub fn le_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    let s = slice_at(data, idx, 2)?;
    Ok(u16::from_le_bytes([s[0], s[1]]))
}

pub fn be_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    let s = slice_at(data, idx, 2)?;
    Ok(u16::from_be_bytes([s[0], s[1]]))
}

/// Parse an Idm (8 bytes) at `start`.
pub fn idm_at(data: &[u8], start: usize) -> Result<Idm> {
    Idm::try_from(slice_at(data, start, 8)?)
}

pub fn pmm_at(data: &[u8], start: usize) -> Result<Pmm> {
    Pmm::try_from(slice_at(data, start, 8)?)
}

/// Ensure the byte at `idx` equals `expected`.
pub fn expect_byte(data: &[u8], idx: usize, expected: u8) -> Result<()> {
    let actual = byte_at(data, idx)?;
    if actual != expected {
        return Err(Error::UnexpectedResponse { expected, actual });
    }
    Ok(())
}
