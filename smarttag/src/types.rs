// smarttag/src/types.rs

use crate::Error;
use std::convert::TryFrom;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn array_from_slice<const N: usize>(bytes: &[u8]) -> Result<[u8; N], Error> {
    <[u8; N]>::try_from(bytes).map_err(|_| Error::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

/// IDm - Newtype Pattern (8 バイト)
///
/// Used both for the tag identity we present in card emulation and for the
/// peer (phone) identity that is bound into a one-time URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Idm([u8; 8]);

impl Idm {
    pub const ZERO: Self = Self([0; 8]);

    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }

    /// Fresh random IDm from the OS entropy source.
    pub fn random() -> crate::Result<Self> {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes)?;
        Ok(Self(bytes))
    }
}

impl TryFrom<&[u8]> for Idm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        array_from_slice(bytes).map(Self)
    }
}

/// PMm - Newtype Pattern (8 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pmm([u8; 8]);

impl Pmm {
    /// PMm presented while emulating a Type-3 tag.
    pub const TAG: Self = Self([0x01, 0x20, 0x22, 0x04, 0x27, 0x3f, 0x7f, 0xff]);

    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Pmm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        array_from_slice(bytes).map(Self)
    }
}

/// SystemCode (u16)
///
/// NFC-F carries system codes big-endian on the air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemCode(u16);

impl SystemCode {
    pub const ANY: Self = Self(0xffff);
    /// NFC Forum Type-3 Tag (NDEF) system code
    pub const NDEF: Self = Self(0x12fc);
    /// Mobile FeliCa, used when polling for a phone in initiator mode
    pub const MOBILE: Self = Self(0xfe0f);

    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
}

/// ServiceCode (u16), little-endian on the air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceCode(u16);

impl ServiceCode {
    /// NDEF read-only service of a Type-3 tag
    pub const NDEF_READ: Self = Self(0x000b);

    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn to_le_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }
}

/// BlockData (16 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockData([u8; 16]);

impl BlockData {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Copy up to 16 bytes, zero padding the remainder.
    pub fn padded(bytes: &[u8]) -> Self {
        let mut block = [0u8; 16];
        let n = bytes.len().min(16);
        block[..n].copy_from_slice(&bytes[..n]);
        Self(block)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }
}

/// Station identifier, printed on the station and carried in clear in every URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationId([u8; 8]);

impl StationId {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for StationId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        array_from_slice(bytes).map(Self)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::utils::Hex(&self.0))
    }
}

/// AES-128 station key. `Debug` never prints the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct StationKey([u8; 16]);

impl StationKey {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Debug for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StationKey(..)")
    }
}

/// Per-station identity, provisioned once and never regenerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationIdentity {
    pub station_id: StationId,
    pub station_key: StationKey,
}

impl StationIdentity {
    pub fn new(station_id: [u8; 8], station_key: [u8; 16]) -> Self {
        Self {
            station_id: StationId::from_bytes(station_id),
            station_key: StationKey::from_bytes(station_key),
        }
    }
}
