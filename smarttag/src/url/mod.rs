// smarttag/src/url/mod.rs

//! One-time URLs.
//!
//! Envelope (before encryption):
//!
//! ```text
//! station_id[8] | counter[4, LE] | peer_id[8] | telemetry[0..28] | sha1_trunc[8]
//! ```
//!
//! Bytes `[12..]` are AES-CTR encrypted with counter block
//! `station_id | counter | 00 00 00 00`, then the 16 bytes at offset 8 are
//! AES-ECB encrypted in place, a version byte is appended and the result is
//! web-safe base64 encoded behind a fixed prefix.

pub mod builder;
pub mod decoder;
pub mod telemetry;

pub use builder::{StationUrl, UrlBuilder, plaintext_envelope, seal_envelope};
pub use decoder::{DecodedUrl, decode_payload, open_envelope, peek_station_id, verify_url};
pub use telemetry::TelemetrySnapshot;

pub(crate) const COUNTER_OFFSET: usize = 8;
pub(crate) const PEER_OFFSET: usize = 12;
pub(crate) const TELEMETRY_OFFSET: usize = 20;
pub(crate) const HASH_LEN: usize = 8;
/// Start of the single ECB-encrypted block.
pub(crate) const ECB_OFFSET: usize = 8;
/// Envelope with empty telemetry, version byte included.
pub(crate) const MIN_SEALED_LEN: usize = TELEMETRY_OFFSET + HASH_LEN + 1;
