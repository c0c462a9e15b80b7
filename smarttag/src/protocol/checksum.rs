// smarttag/src/protocol/checksum.rs

/// Length checksum (LCS) of a host packet: `LEN + LCS == 0 (mod 256)`.
pub fn lcs(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}

/// Data checksum (DCS) of a host packet: 8-bit two's complement of the sum.
pub fn dcs(payload: &[u8]) -> u8 {
    let sum = payload.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}

/// Plain 16-bit sum, used by the Type-3 attribute block.
pub fn sum16(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)))
}

/// 16-bit two's complement of the sum, used by Felica Push.
pub fn neg_sum16(bytes: &[u8]) -> u16 {
    0u16.wrapping_sub(sum16(bytes))
}
