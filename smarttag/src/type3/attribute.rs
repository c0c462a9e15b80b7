// smarttag/src/type3/attribute.rs

use crate::protocol::checksum::sum16;
use crate::type3::{BLOCK_SIZE, MAX_BLOCKS_PER_READ, num_blocks};

const T3T_VERSION: u8 = 0x10;
const WRITE_FINISHED: u8 = 0x00;
const ACCESS_READ_ONLY: u8 = 0x00;

/// Attribute information block for a record of `record_len` bytes.
///
/// ```text
/// ver nbr nbw nmaxb(2) 00 00 00 00 writeF rwFlag Ln(3) checksum(2)
/// ```
pub fn attribute_block(record_len: usize) -> [u8; BLOCK_SIZE] {
    let blocks = num_blocks(record_len);
    let nmaxb = u16::try_from(blocks).unwrap_or(u16::MAX);
    let ln = (record_len as u32).min(0x00ff_ffff).to_be_bytes();

    let mut block = [0u8; BLOCK_SIZE];
    block[0] = T3T_VERSION;
    block[1] = blocks.min(MAX_BLOCKS_PER_READ) as u8;
    block[2] = 0x01; // nbw
    block[3..5].copy_from_slice(&nmaxb.to_be_bytes());
    block[9] = WRITE_FINISHED;
    block[10] = ACCESS_READ_ONLY;
    block[11..14].copy_from_slice(&ln[1..]);
    let cksum = sum16(&block[..14]);
    block[14..].copy_from_slice(&cksum.to_be_bytes());
    block
}
