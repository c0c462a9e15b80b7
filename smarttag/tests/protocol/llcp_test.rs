#[path = "../common/mod.rs"]
mod common;

use smarttag::llcp::{DeliveryMode, LlcpState, PushDelivery, pdu};
use smarttag::records::{npp, smart_poster, snep_put, static_url};

const SYMM: [u8; 2] = [0x00, 0x00];

fn poster() -> Vec<u8> {
    smart_poster(Some("Google Place"), &mut static_url("http://example.com/")).unwrap()
}

#[test]
fn snep_put_carries_the_poster() {
    common::init_logger();
    let ndef = poster();
    let mut d = PushDelivery::new(ndef.clone());

    assert_eq!(d.on_pdu(&SYMM).unwrap(), vec![0x11, 0x20]);
    let put = d.on_pdu(&[0x81, 0x84]).unwrap();
    assert_eq!(pdu::ptype(&put), Some(pdu::PduType::I));
    assert_eq!(pdu::payload(&put), &snep_put(&ndef).unwrap()[..]);
    assert_eq!(d.state(), LlcpState::Connected);
}

#[test]
fn npp_fallback_carries_the_poster() {
    let ndef = poster();
    let mut d = PushDelivery::new(ndef.clone());
    d.on_pdu(&SYMM).unwrap();
    d.on_pdu(&[0x81, 0xc4, 0x02]).unwrap();
    assert_eq!(d.mode(), DeliveryMode::Npp);

    let push = d.on_pdu(&[0x81, 0x90]).unwrap();
    assert_eq!(pdu::payload(&push), &npp(&ndef).unwrap()[..]);
    assert!(d.succeeded());
}

#[test]
fn peer_symm_while_connecting_is_echoed() {
    let mut d = PushDelivery::new(poster());
    d.on_pdu(&SYMM).unwrap();
    assert_eq!(d.on_pdu(&SYMM).unwrap(), SYMM.to_vec());
    assert_eq!(d.state(), LlcpState::ConnPending);
    assert!(!d.is_done());
}

#[test]
fn atr_general_bytes_announce_llcp() {
    assert!(pdu::is_llcp_atr_req(&smarttag::llcp::ATR_GENERAL_BYTES));
    assert!(!pdu::is_llcp_atr_req(&[0x46, 0x66]));
}
