// smarttag/src/error.rs

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// Destination buffer (or a length field) cannot hold the output.
    #[error("buffer exceeded: need {needed} bytes, capacity {capacity}")]
    BufferExceeded { needed: usize, capacity: usize },

    #[error("operation timed out")]
    Timeout,

    /// The front-end or peer answered with something we did not ask for.
    #[error("unexpected reply: {0}")]
    UnexpectedReply(String),

    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    /// Peer refused or sent a request we do not serve.
    #[error("protocol reject: {0}")]
    ProtocolReject(String),

    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("frame format error: {0}")]
    FrameFormat(String),

    #[error("device status error: {0:#04x}")]
    DeviceStatus(u8),

    #[error("url source produced no url")]
    UrlUnavailable,

    #[error("invalid encoding: {0}")]
    Encoding(String),

    #[error("integrity check failed: hash mismatch")]
    IntegrityCheck,

    #[error("station identity has not been provisioned")]
    NotProvisioned,

    #[error("url counter exhausted")]
    CounterExhausted,

    #[error("entropy source failure: {0}")]
    Entropy(#[from] getrandom::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
