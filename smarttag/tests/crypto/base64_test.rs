#[path = "../common/mod.rs"]
mod common;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use proptest::prelude::*;
use smarttag::Error;
use smarttag::crypto::base64::{decode, encode, encode_into, encoded_len};

proptest! {
    #[test]
    fn encode_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..120)) {
        let ours = encode(&data, encoded_len(data.len()) + 1).unwrap();
        prop_assert_eq!(&ours, &URL_SAFE_NO_PAD.encode(&data));
        prop_assert_eq!(decode(&ours).unwrap(), data);
    }

    #[test]
    fn decode_accepts_what_reference_accepts(text in "[A-Za-z0-9_-]{0,12}") {
        let ours = decode(&text).ok();
        let reference = URL_SAFE_NO_PAD.decode(&text).ok();
        prop_assert_eq!(ours, reference);
    }
}

#[test]
fn envelope_sized_input() {
    common::init_logger();
    // 41 byte sealed envelope with 12 bytes of telemetry
    let data: Vec<u8> = (0..41u8).collect();
    let mut out = [0xffu8; 64];
    let n = encode_into(&data, &mut out).unwrap();
    assert_eq!(n, 55);
    assert_eq!(out[n], 0);
    assert_eq!(
        std::str::from_utf8(&out[..n]).unwrap(),
        URL_SAFE_NO_PAD.encode(&data)
    );
}

#[test]
fn terminator_must_fit() {
    let data = [0u8; 3];
    let mut out = [0u8; 4];
    assert!(matches!(
        encode_into(&data, &mut out),
        Err(Error::BufferExceeded { needed: 5, capacity: 4 })
    ));
}

#[test]
fn standard_alphabet_is_rejected() {
    assert!(matches!(decode("ab+/"), Err(Error::Encoding(_))));
}
