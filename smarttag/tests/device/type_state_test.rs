#[path = "../common/mod.rs"]
mod common;

use smarttag::device::{Device, DeviceBuilder, rcs956};
use smarttag::test_support::{Script, sent_commands};
use smarttag::transport::{MockTransport, SharedTransport, Transport};

#[test]
fn initialize_resets_the_front_end() {
    common::init_logger();
    let shared = SharedTransport::new(Script::new().reset().into_mock());
    let boxed: Box<dyn Transport> = Box::new(shared.clone());

    let device = DeviceBuilder::new()
        .with_transport(boxed)
        .response_timeout_ms(400)
        .build_uninitialized()
        .unwrap();
    assert_eq!(device.response_timeout_ms(), 400);

    let initialized = device.initialize().unwrap();
    assert_eq!(initialized.response_timeout_ms(), 400);

    assert_eq!(shared.with(|m| m.resets), 1);
    assert_eq!(sent_commands(&shared), vec![rcs956::reset()]);
    // reset is followed by an ACK to cancel anything pending
    assert_eq!(shared.sent().last().map(|f| f.len()), Some(6));
}

#[test]
fn initialize_fails_without_reply() {
    let device = Device::new_with_transport(Box::new(MockTransport::new())).unwrap();
    assert!(matches!(
        device.initialize(),
        Err(smarttag::Error::Timeout)
    ));
}
