// smarttag/src/type3/mod.rs

//! NFC Forum Type-3 Tag emulation on top of FeliCa.
//!
//! The tag exposes one read-only NDEF service: block 0 is the attribute
//! information block, blocks 1.. carry the record in 16 byte slices.

pub mod attribute;
pub mod responder;

pub use attribute::attribute_block;
pub use responder::{Type3Reply, Type3Responder};

pub const FELICA_POLL: u8 = 0x00;
pub const FELICA_POLL_RESP: u8 = 0x01;
pub const FELICA_READ_WITHOUT_ENCRYPTION: u8 = 0x06;
pub const FELICA_READ_RESP: u8 = 0x07;

pub const BLOCK_SIZE: usize = 16;

/// Blocks served per Check command.
pub const MAX_BLOCKS_PER_READ: usize = 4;

/// Number of 16 byte blocks needed for `len` bytes.
pub fn num_blocks(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE)
}
