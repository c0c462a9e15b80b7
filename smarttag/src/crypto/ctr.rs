// smarttag/src/crypto/ctr.rs

//! AES-128 counter mode and single block helpers.

use crate::crypto::aes::{Aes128, BLOCK_LEN};
use crate::{Error, Result};

/// Only the low byte of the counter block advances, so at most 256
/// distinct keystream blocks exist per counter block.
pub const CTR_MAX_BLOCKS: usize = 256;

/// Longest buffer `ctr_apply` accepts.
pub const CTR_MAX_LEN: usize = CTR_MAX_BLOCKS * BLOCK_LEN;

/// XOR `buffer` with the AES-CTR keystream starting at `counter`.
///
/// The counter's last byte is incremented (wrapping) after every block;
/// on return `counter` holds the next unused counter block. Applying the
/// same counter twice restores the input. Buffers longer than
/// [`CTR_MAX_LEN`] are rejected before anything is modified.
pub fn ctr_apply(cipher: &Aes128, counter: &mut [u8; BLOCK_LEN], buffer: &mut [u8]) -> Result<()> {
    if buffer.len() > CTR_MAX_LEN {
        return Err(Error::BufferExceeded {
            needed: buffer.len(),
            capacity: CTR_MAX_LEN,
        });
    }

    for chunk in buffer.chunks_mut(BLOCK_LEN) {
        let mut keystream = *counter;
        cipher.encrypt_block(&mut keystream);
        for (b, k) in chunk.iter_mut().zip(keystream.iter()) {
            *b ^= k;
        }
        counter[BLOCK_LEN - 1] = counter[BLOCK_LEN - 1].wrapping_add(1);
    }
    Ok(())
}

/// One-shot CTR with a freshly expanded key.
pub fn aes_ctr(key: &[u8; 16], counter: &mut [u8; BLOCK_LEN], buffer: &mut [u8]) -> Result<()> {
    ctr_apply(&Aes128::new(key), counter, buffer)
}

/// Encrypt a single block in place (ECB, no chaining).
pub fn ecb_encrypt(key: &[u8; 16], block: &mut [u8; BLOCK_LEN]) {
    Aes128::new(key).encrypt_block(block);
}

pub fn ecb_decrypt(key: &[u8; 16], block: &mut [u8; BLOCK_LEN]) {
    Aes128::new(key).decrypt_block(block);
}
