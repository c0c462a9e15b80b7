#[path = "../common/mod.rs"]
mod common;

use aes::cipher::{BlockEncrypt, KeyInit};
use proptest::prelude::*;
use smarttag::crypto::{Aes128, BLOCK_LEN, aes_ctr, ecb_decrypt, ecb_encrypt};

fn reference_block(key: &[u8; 16], block: &[u8; 16]) -> [u8; 16] {
    let cipher = aes::Aes128::new(key.into());
    let mut b = aes::Block::clone_from_slice(block);
    cipher.encrypt_block(&mut b);
    let mut out = [0u8; 16];
    out.copy_from_slice(&b);
    out
}

proptest! {
    #[test]
    fn block_matches_reference(key in any::<[u8; 16]>(), block in any::<[u8; 16]>()) {
        let mut ours = block;
        Aes128::new(&key).encrypt_block(&mut ours);
        prop_assert_eq!(ours, reference_block(&key, &block));
    }

    #[test]
    fn ecb_decrypt_inverts(key in any::<[u8; 16]>(), block in any::<[u8; 16]>()) {
        let mut b = block;
        ecb_encrypt(&key, &mut b);
        ecb_decrypt(&key, &mut b);
        prop_assert_eq!(b, block);
    }

    // With a zero low byte and at most 256 blocks the low byte never wraps,
    // so the keystream equals plain big-endian CTR.
    #[test]
    fn ctr_matches_reference(
        key in any::<[u8; 16]>(),
        prefix in any::<[u8; 12]>(),
        data in proptest::collection::vec(any::<u8>(), 0..600),
    ) {
        let mut counter = [0u8; BLOCK_LEN];
        counter[..12].copy_from_slice(&prefix);

        let mut expected = data.clone();
        for (i, chunk) in expected.chunks_mut(BLOCK_LEN).enumerate() {
            let mut block = counter;
            block[BLOCK_LEN - 1] = i as u8;
            let ks = reference_block(&key, &block);
            for (b, k) in chunk.iter_mut().zip(ks.iter()) {
                *b ^= k;
            }
        }

        let mut ours = data.clone();
        aes_ctr(&key, &mut counter, &mut ours).unwrap();
        prop_assert_eq!(ours, expected);
        prop_assert_eq!(counter[BLOCK_LEN - 1] as usize, data.len().div_ceil(BLOCK_LEN));
    }
}

#[test]
fn fips197_vector() {
    common::init_logger();
    let key = hex_literal::hex!("000102030405060708090a0b0c0d0e0f");
    let mut block = hex_literal::hex!("00112233445566778899aabbccddeeff");
    ecb_encrypt(&key, &mut block);
    assert_eq!(hex::encode(block), "69c4e0d86a7b0430d8cdb78070b4c55a");
}
