#[path = "../common/mod.rs"]
mod common;

use hex_literal::hex;
use smarttag::device::rcs956::{COMMUNICATE_THRU_EX, TG_GET_DEP_DATA, TG_INIT_AS_TARGET};
use smarttag::test_support::{Script, initialized_mock_device, sent_commands};

#[test]
fn activation_after_stray_ack() {
    common::init_logger();
    let script = Script::new()
        .ack()
        .ack()
        .response(TG_INIT_AS_TARGET, &hex!("22 06 00 12fc 01 00"));
    let (mut dev, shared) = initialized_mock_device(script).unwrap();

    dev.tg_init_as_target(&common::fixtures::card_idm()).unwrap();
    let activation = dev.wait_for_initiator(500).unwrap().unwrap();
    assert_eq!(activation, hex!("22 06 00 12fc 01 00").to_vec());

    let init = &sent_commands(&shared)[1];
    assert_eq!(&init[..2], &hex!("d4 8c"));
}

#[test]
fn nobody_polls() {
    let script = Script::new().ack();
    let (mut dev, shared) = initialized_mock_device(script).unwrap();
    dev.tg_init_as_target(&common::fixtures::card_idm()).unwrap();
    assert_eq!(dev.wait_for_initiator(500).unwrap(), None);
    // the pending TgInitAsTarget is cancelled with an ACK
    assert_eq!(shared.sent().last().map(|f| f.to_vec()), Some(hex!("0000ff00ff00").to_vec()));
}

#[test]
fn comm_thru_ex_timeout_is_little_endian() {
    let script = Script::new().reply(COMMUNICATE_THRU_EX, &[0x00, 0x03, 0x07]);
    let (mut dev, shared) = initialized_mock_device(script).unwrap();
    let data = dev.comm_thru_ex(&[0x02, 0x01], 512).unwrap();
    assert_eq!(data, vec![0x00, 0x03, 0x07]);
    assert_eq!(sent_commands(&shared)[1], hex!("d4 a0 00 02 02 01").to_vec());
}

#[test]
fn dep_data_is_returned_with_status() {
    let script = Script::new().reply(TG_GET_DEP_DATA, &hex!("00 0000"));
    let (mut dev, _) = initialized_mock_device(script).unwrap();
    assert_eq!(dev.tg_get_dep_data().unwrap(), hex!("00 0000").to_vec());
}
