#[path = "../common/mod.rs"]
mod common;

use smarttag::Error;
use smarttag::transport::{MockTransport, SharedTransport, Transport};

#[test]
fn mock_transport_send_and_receive() {
    let mut m = MockTransport::new();
    m.push_response(vec![0x01]);
    m.send(&[0xAA]).unwrap();
    assert_eq!(m.sent.len(), 1);
    let r = m.receive(1000).unwrap();
    assert_eq!(r, vec![0x01]);
    assert_eq!(m.timeouts, vec![1000]);
    assert_eq!(m.pop_sent(), Some(vec![0xAA]));
    assert!(m.sent.is_empty());
}

#[test]
fn empty_queue_times_out() {
    let mut m = MockTransport::new();
    assert!(matches!(m.receive(10), Err(Error::Timeout)));
}

#[test]
fn shared_handle_sees_traffic() {
    let shared = SharedTransport::new(MockTransport::new());
    let mut handle: Box<dyn Transport> = Box::new(shared.clone());
    handle.send(&[0x10, 0x20]).unwrap();
    handle.reset().unwrap();
    assert_eq!(shared.sent(), vec![vec![0x10, 0x20]]);
    assert_eq!(shared.with(|m| m.resets), 1);
}
