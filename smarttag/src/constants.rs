// smarttag/src/constants.rs
//! Protocol constants shared across the crate

/// RC-S956 host packet preamble: 0x00 0x00 0xFF
pub const FRAME_PREAMBLE: [u8; 3] = [0x00, 0x00, 0xFF];

/// RC-S956 host packet postamble: 0x00
pub const FRAME_POSTAMBLE: u8 = 0x00;

/// Minimal normal frame length in bytes
pub const FRAME_MIN_LEN: usize = 7;

/// Maximum payload length of a normal frame
pub const FRAME_MAX_PAYLOAD_LEN: usize = 255;

/// ACK packet exchanged after every command
pub const ACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// Host -> device (D4) and device -> host (D5) command prefixes
pub const RCS956_CMD_PREFIX_HOST: u8 = 0xD4;
pub const RCS956_CMD_PREFIX_DEVICE: u8 = 0xD5;

/// Prefix placed in front of the base64 payload of a one-time URL.
pub const URL_PREFIX: &str = "http://nfc-smart-tag.appspot.com/nfc?nv=";

/// Envelope format version appended after encryption.
pub const URL_VERSION: u8 = 2;

/// Default capacity of the URL buffer, terminator included.
pub const URL_CAPACITY: usize = 128;

/// Upper bound of the telemetry section of the envelope.
pub const MAX_TELEMETRY_LEN: usize = 28;

/// Exchanges allowed per target session (Type-3 reads or LLCP PDUs).
pub const MAX_TARGET_LOOP_TIMES: usize = 16;

/// Target sessions attempted per cycle while the outcome is Retry.
pub const TARGET_MODE_RETRY: usize = 10;

/// Budget for an initiator to show up after TgInitAsTarget.
pub const TG_INIT_WAIT_MS: u64 = 500;

/// Budget for the next initiator command during a session.
pub const TG_COMM_TIMEOUT_MS: u64 = 512;

/// Poll attempts in initiator mode (first attempt not counted).
pub const NUM_RETRY_INITIATOR_LOOP: usize = 5;

/// Budget for a Felica Push round trip in initiator mode.
pub const PUSH_COMM_TIMEOUT_MS: u64 = 1000;

/// Label shown by the phone browser for a Felica Push
/// ("Googleプレイス" in Shift-JIS).
pub const PUSH_LABEL_SJIS: &[u8] = b"Google\x83\x76\x83\x8c\x83\x43\x83\x58";

/// Title carried by the Smart Poster in card emulation.
pub const POSTER_LABEL: &str = "Google Place";
