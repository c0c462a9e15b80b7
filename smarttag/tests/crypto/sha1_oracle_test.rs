#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use ::sha1::{Digest, Sha1 as RefSha1};
use smarttag::crypto::{Sha1, hash64, sha1};

fn reference(data: &[u8]) -> [u8; 20] {
    let mut out = [0u8; 20];
    out.copy_from_slice(&RefSha1::digest(data));
    out
}

proptest! {
    #[test]
    fn digest_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..300)) {
        let expected = reference(&data);
        prop_assert_eq!(sha1(&data), expected);
        prop_assert_eq!(&hash64(&data)[..], &expected[..8]);
    }

    #[test]
    fn chunked_updates_match_reference(
        data in proptest::collection::vec(any::<u8>(), 0..400),
        step in 1usize..70,
    ) {
        let mut h = Sha1::new();
        for piece in data.chunks(step) {
            h.update(piece);
        }
        let expected = reference(&data);
        prop_assert_eq!(h.finalize(), expected);
    }
}

#[test]
fn padding_boundaries() {
    common::init_logger();
    // 55, 56 and 64 bytes straddle the length field of the last block
    for len in [55usize, 56, 63, 64, 65, 119, 120] {
        let data = vec![0x61u8; len];
        let expected = reference(&data);
        assert_eq!(sha1(&data), expected, "length {}", len);
    }
}
