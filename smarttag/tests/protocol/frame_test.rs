#[path = "../common/mod.rs"]
mod common;

use hex_literal::hex;
use smarttag::Error;
use smarttag::device::rcs956;
use smarttag::protocol::{Frame, dcs, lcs};

#[test]
fn reset_command_frame() {
    let frame = Frame::encode(&rcs956::reset()).unwrap();
    assert_eq!(frame, hex!("0000ff 03 fd d4 18 01 13 00").to_vec());
    assert_eq!(lcs(frame[3]), frame[4]);
    assert_eq!(dcs(&frame[5..8]), frame[8]);
}

#[test]
fn decode_rejects_bad_dcs() {
    let mut frame = Frame::encode(&[0xd5, 0x19]).unwrap();
    let n = frame.len();
    frame[n - 2] ^= 0xff;
    assert!(matches!(
        Frame::decode(&frame),
        Err(Error::ChecksumMismatch { .. })
    ));
}

#[test]
fn ack_is_not_a_normal_frame() {
    let ack = Frame::ack();
    assert!(Frame::is_ack(&ack));
    assert!(Frame::decode(&ack).is_err());
}

#[test]
fn longest_payload_fits() {
    let payload = vec![0x5a; 255];
    let frame = Frame::encode(&payload).unwrap();
    assert_eq!(frame.len(), 7 + 255);
    assert_eq!(Frame::decode(&frame).unwrap(), payload);
    assert!(matches!(
        Frame::encode(&[0u8; 256]),
        Err(Error::BufferExceeded { .. })
    ));
}
