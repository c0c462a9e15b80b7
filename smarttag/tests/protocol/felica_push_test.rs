#[path = "../common/mod.rs"]
mod common;

use smarttag::Error;
use smarttag::constants::PUSH_LABEL_SJIS;
use smarttag::protocol::sum16;
use smarttag::records::{felica_push_url, is_felica_push_response, static_url};

const URL: &str = "http://example.com/nfc?nv=AAAA";

#[test]
fn packet_layout() {
    common::init_logger();
    let idm = common::fixtures::phone_idm();
    let packet = felica_push_url(&idm, &mut static_url(URL), PUSH_LABEL_SJIS).unwrap();

    assert_eq!(packet[0] as usize, packet.len());
    assert_eq!(packet[1], 0xb0);
    assert_eq!(&packet[2..10], idm.as_bytes());
    assert_eq!(packet[10] as usize, packet.len() - 11);
    assert_eq!(&packet[11..13], &[0x01, 0x02]);

    let param_len = u16::from_le_bytes([packet[13], packet[14]]) as usize;
    assert_eq!(param_len, 2 + URL.len() + PUSH_LABEL_SJIS.len());
    assert_eq!(common::fixtures::push_packet_url(&packet), URL);

    let label_at = 17 + URL.len();
    assert_eq!(&packet[label_at..label_at + PUSH_LABEL_SJIS.len()], PUSH_LABEL_SJIS);
}

#[test]
fn checksum_cancels_block_sum() {
    let idm = common::fixtures::phone_idm();
    let packet = felica_push_url(&idm, &mut static_url(URL), b"label").unwrap();
    let n = packet.len();
    let cksum = u16::from_be_bytes([packet[n - 2], packet[n - 1]]);
    assert_eq!(sum16(&packet[11..n - 2]).wrapping_add(cksum), 0);
}

#[test]
fn url_too_long_for_packet() {
    let idm = common::fixtures::phone_idm();
    let long = "h".repeat(250);
    assert!(matches!(
        felica_push_url(&idm, &mut static_url(&long), PUSH_LABEL_SJIS),
        Err(Error::BufferExceeded { .. })
    ));
}

#[test]
fn response_recognition() {
    assert!(is_felica_push_response(&common::fixtures::push_response(0x00)));
    assert!(!is_felica_push_response(&common::fixtures::push_response(0x01)));
    assert!(!is_felica_push_response(&[0x00, 0x0a]));
}
