// smarttag/src/crypto/mod.rs

//! Crypto kernels behind the one-time URL: AES-128 (block, CTR, single
//! block ECB), truncated SHA-1 and web-safe base64.

pub mod aes;
pub mod base64;
pub mod ctr;
pub mod sha1;

pub use aes::{Aes128, BLOCK_LEN};
pub use ctr::{aes_ctr, ctr_apply, ecb_decrypt, ecb_encrypt};
pub use sha1::{Sha1, hash64, sha1};
