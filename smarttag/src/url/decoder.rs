// smarttag/src/url/decoder.rs

//! Server side of the one-time URL: undo the encryption layers and check
//! the truncated hash.

use log::debug;

use crate::crypto::{Aes128, BLOCK_LEN, base64, ctr_apply, hash64};
use crate::types::{Idm, StationId, StationKey};
use crate::url::telemetry::TelemetrySnapshot;
use crate::url::{COUNTER_OFFSET, ECB_OFFSET, HASH_LEN, MIN_SEALED_LEN, PEER_OFFSET, TELEMETRY_OFFSET};
use crate::{Error, Result};

/// Contents of a verified one-time URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedUrl {
    pub station_id: StationId,
    pub counter: u32,
    /// `None` when the URL was built without a peer (all-zero field).
    pub peer_id: Option<Idm>,
    pub telemetry: TelemetrySnapshot,
    pub version: u8,
}

/// Station id of a sealed envelope; it travels in clear so the verifier can
/// look up the key.
pub fn peek_station_id(sealed: &[u8]) -> Result<StationId> {
    crate::protocol::parser::ensure_len(sealed, MIN_SEALED_LEN)?;
    StationId::try_from(&sealed[..COUNTER_OFFSET])
}

/// Decrypt and verify raw envelope bytes (version byte included).
pub fn open_envelope(key: &StationKey, sealed: &[u8]) -> Result<DecodedUrl> {
    crate::protocol::parser::ensure_len(sealed, MIN_SEALED_LEN)?;
    let (body, version) = sealed.split_at(sealed.len() - 1);
    let mut data = body.to_vec();

    let cipher = Aes128::new(key.as_bytes());

    let mut block = [0u8; BLOCK_LEN];
    block.copy_from_slice(&data[ECB_OFFSET..ECB_OFFSET + BLOCK_LEN]);
    cipher.decrypt_block(&mut block);
    data[ECB_OFFSET..ECB_OFFSET + BLOCK_LEN].copy_from_slice(&block);

    let mut nonce = [0u8; BLOCK_LEN];
    nonce[..PEER_OFFSET].copy_from_slice(&data[..PEER_OFFSET]);
    ctr_apply(&cipher, &mut nonce, &mut data[PEER_OFFSET..])?;

    let hash_at = data.len() - HASH_LEN;
    if hash64(&data[..hash_at]) != data[hash_at..] {
        return Err(Error::IntegrityCheck);
    }

    let counter = u32::from_le_bytes([
        data[COUNTER_OFFSET],
        data[COUNTER_OFFSET + 1],
        data[COUNTER_OFFSET + 2],
        data[COUNTER_OFFSET + 3],
    ]);
    let peer = Idm::try_from(&data[PEER_OFFSET..TELEMETRY_OFFSET])?;
    let telemetry = TelemetrySnapshot::decode(&data[TELEMETRY_OFFSET..hash_at])?;
    let station_id = StationId::try_from(&data[..COUNTER_OFFSET])?;

    debug!("verified url from station {} counter={}", station_id, counter);
    Ok(DecodedUrl {
        station_id,
        counter,
        peer_id: (peer != Idm::ZERO).then_some(peer),
        telemetry,
        version: version[0],
    })
}

/// Verify the base64 payload that follows the URL prefix.
pub fn decode_payload(key: &StationKey, payload: &str) -> Result<DecodedUrl> {
    open_envelope(key, &base64::decode(payload)?)
}

/// Verify a complete URL built with `prefix`.
pub fn verify_url(key: &StationKey, url: &str, prefix: &str) -> Result<DecodedUrl> {
    let payload = url
        .strip_prefix(prefix)
        .ok_or_else(|| Error::Encoding(format!("url does not start with {}", prefix)))?;
    decode_payload(key, payload)
}
