// smarttag/src/url/builder.rs

use log::{debug, trace};

use crate::config::StationConfig;
use crate::constants::{URL_CAPACITY, URL_PREFIX, URL_VERSION};
use crate::crypto::{Aes128, BLOCK_LEN, base64, ctr_apply, hash64};
use crate::records::UrlSource;
use crate::store::StationStore;
use crate::types::{Idm, StationId, StationIdentity};
use crate::url::{ECB_OFFSET, HASH_LEN, PEER_OFFSET, TELEMETRY_OFFSET};
use crate::url::telemetry::TelemetrySnapshot;
use crate::{Error, Result};

/// Envelope bytes before encryption, hash included.
pub fn plaintext_envelope(
    station_id: &StationId,
    counter: u32,
    peer_id: Option<&Idm>,
    telemetry: &[u8],
) -> Vec<u8> {
    let mut data = Vec::with_capacity(TELEMETRY_OFFSET + telemetry.len() + HASH_LEN);
    data.extend_from_slice(station_id.as_bytes());
    data.extend_from_slice(&counter.to_le_bytes());
    data.extend_from_slice(peer_id.unwrap_or(&Idm::ZERO).as_bytes());
    data.extend_from_slice(telemetry);
    let hash = hash64(&data);
    data.extend_from_slice(&hash);
    data
}

/// Encrypt an envelope and append the version byte.
pub fn seal_envelope(
    identity: &StationIdentity,
    counter: u32,
    peer_id: Option<&Idm>,
    telemetry: &[u8],
    version: u8,
) -> Result<Vec<u8>> {
    let mut data = plaintext_envelope(&identity.station_id, counter, peer_id, telemetry);
    #[cfg(feature = "diagnostics")]
    trace!("envelope plaintext: {}", crate::utils::Hex(&data));

    let cipher = Aes128::new(identity.station_key.as_bytes());

    let mut nonce = [0u8; BLOCK_LEN];
    nonce[..PEER_OFFSET].copy_from_slice(&data[..PEER_OFFSET]);
    ctr_apply(&cipher, &mut nonce, &mut data[PEER_OFFSET..])?;

    let mut block = [0u8; BLOCK_LEN];
    block.copy_from_slice(&data[ECB_OFFSET..ECB_OFFSET + BLOCK_LEN]);
    cipher.encrypt_block(&mut block);
    data[ECB_OFFSET..ECB_OFFSET + BLOCK_LEN].copy_from_slice(&block);

    data.push(version);
    Ok(data)
}

/// Builds one-time URLs from the station's persistent state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    prefix: String,
    version: u8,
    capacity: usize,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new(URL_PREFIX, URL_VERSION, URL_CAPACITY)
    }
}

impl UrlBuilder {
    /// `capacity` bounds the whole URL, terminator included.
    pub fn new(prefix: impl Into<String>, version: u8, capacity: usize) -> Self {
        Self {
            prefix: prefix.into(),
            version,
            capacity,
        }
    }

    pub fn from_config(config: &StationConfig) -> Self {
        Self::new(
            config.url_prefix.clone(),
            config.url_version,
            config.url_capacity,
        )
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// URL length (terminator excluded) for a telemetry section of
    /// `telemetry_len` bytes.
    pub fn url_len(&self, telemetry_len: usize) -> usize {
        let sealed = TELEMETRY_OFFSET + telemetry_len + HASH_LEN + 1;
        self.prefix.len() + base64::encoded_len(sealed)
    }

    /// Write a fresh URL plus NUL terminator into `out`, returning its length.
    ///
    /// The size check runs before the counter moves, so a URL that cannot be
    /// delivered does not consume a counter value.
    pub fn build_into<S: StationStore + ?Sized>(
        &self,
        store: &mut S,
        peer_id: Option<&Idm>,
        telemetry: &TelemetrySnapshot,
        out: &mut [u8],
    ) -> Result<usize> {
        let identity = store.station_identity()?;
        let tlv = telemetry.encode();

        let capacity = out.len().min(self.capacity);
        let needed = self.url_len(tlv.len()) + 1;
        if needed > capacity {
            return Err(Error::BufferExceeded { needed, capacity });
        }

        let counter = store.increment_counter()?;
        let sealed = seal_envelope(&identity, counter, peer_id, &tlv, self.version)?;

        let head = self.prefix.len();
        out[..head].copy_from_slice(self.prefix.as_bytes());
        let n = base64::encode_into(&sealed, &mut out[head..capacity])?;
        debug!(
            "built url for station {} counter={} peer={}",
            identity.station_id,
            counter,
            peer_id.map(|p| p.to_hex()).unwrap_or_else(|| "-".into())
        );
        Ok(head + n)
    }

    pub fn build<S: StationStore + ?Sized>(
        &self,
        store: &mut S,
        peer_id: Option<&Idm>,
        telemetry: &TelemetrySnapshot,
    ) -> Result<String> {
        let mut buf = vec![0u8; self.capacity];
        let n = self.build_into(store, peer_id, telemetry, &mut buf)?;
        buf.truncate(n);
        String::from_utf8(buf).map_err(|e| Error::Encoding(e.to_string()))
    }
}

/// [`UrlSource`] producing a fresh one-time URL per call, with the store's
/// current telemetry.
pub struct StationUrl<'a, S: StationStore + ?Sized> {
    builder: &'a UrlBuilder,
    store: &'a mut S,
    peer_id: Option<Idm>,
}

impl<'a, S: StationStore + ?Sized> StationUrl<'a, S> {
    pub fn new(builder: &'a UrlBuilder, store: &'a mut S, peer_id: Option<Idm>) -> Self {
        Self {
            builder,
            store,
            peer_id,
        }
    }
}

impl<S: StationStore + ?Sized> UrlSource for StationUrl<'_, S> {
    fn produce(&mut self, buf: &mut [u8]) -> Result<usize> {
        let telemetry = self.store.telemetry()?;
        self.builder
            .build_into(&mut *self.store, self.peer_id.as_ref(), &telemetry, buf)
    }
}
