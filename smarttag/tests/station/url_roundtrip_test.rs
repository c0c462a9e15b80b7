#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use smarttag::url::{TelemetrySnapshot, UrlBuilder, open_envelope, verify_url};
use smarttag::{Error, Idm, StationKey};

// values below 2^21 keep every field within three varint bytes, so the
// whole snapshot fits the telemetry budget
fn small() -> impl Strategy<Value = Option<u32>> {
    proptest::option::of(0u32..(1 << 21))
}

prop_compose! {
    fn telemetry()(
        watchdog_resets in small(),
        external_resets in small(),
        power_on_resets in small(),
        serial_failures in small(),
        brown_out_resets in small(),
        battery_voltage in proptest::option::of(1u8..=255),
    ) -> TelemetrySnapshot {
        TelemetrySnapshot {
            watchdog_resets,
            external_resets,
            power_on_resets,
            serial_failures,
            brown_out_resets,
            battery_voltage,
        }
    }
}

proptest! {
    #[test]
    fn urls_verify_with_increasing_counters(
        start in 0u32..1_000_000,
        peer in proptest::option::of(any::<[u8; 8]>()),
        snapshot in telemetry(),
    ) {
        let key = common::fixtures::identity().station_key;
        let mut store = common::fixtures::store().with_counter(start);
        let builder = UrlBuilder::default();
        let peer = peer.map(Idm::from_bytes).filter(|p| *p != Idm::ZERO);

        let mut last = start;
        for _ in 0..3 {
            let url = builder.build(&mut store, peer.as_ref(), &snapshot).unwrap();
            prop_assert!(url.len() < builder.capacity());
            let decoded = verify_url(&key, &url, builder.prefix()).unwrap();
            prop_assert_eq!(decoded.counter, last + 1);
            prop_assert_eq!(decoded.peer_id, peer);
            prop_assert_eq!(decoded.telemetry, snapshot);
            prop_assert_eq!(decoded.version, 2);
            last = decoded.counter;
        }
    }

    #[test]
    fn garbage_never_verifies(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let key = common::fixtures::identity().station_key;
        prop_assert!(open_envelope(&key, &bytes).is_err());
    }
}

#[test]
fn oversized_url_does_not_spend_the_counter() {
    common::init_logger();
    let plain = UrlBuilder::default();
    let tight = UrlBuilder::new(plain.prefix(), 2, plain.url_len(0) + 1);
    let mut store = common::fixtures::store();
    let telemetry = TelemetrySnapshot {
        serial_failures: Some(1),
        ..Default::default()
    };

    assert!(matches!(
        tight.build(&mut store, None, &telemetry),
        Err(Error::BufferExceeded { .. })
    ));
    assert_eq!(store.counter(), 0);

    // without telemetry the same capacity is enough
    tight.build(&mut store, None, &TelemetrySnapshot::default()).unwrap();
    assert_eq!(store.counter(), 1);
}

#[test]
fn counter_exhaustion_is_reported() {
    let mut store = common::fixtures::store().with_counter(u32::MAX);
    assert!(matches!(
        UrlBuilder::default().build(&mut store, None, &TelemetrySnapshot::default()),
        Err(Error::CounterExhausted)
    ));
}

#[test]
fn envelope_from_another_station_key_fails() {
    let identity = common::fixtures::identity();
    let sealed = smarttag::url::seal_envelope(&identity, 7, None, &[], 2).unwrap();
    let other = StationKey::from_bytes([0x5a; 16]);
    assert!(matches!(open_envelope(&other, &sealed), Err(Error::IntegrityCheck)));
    assert_eq!(open_envelope(&identity.station_key, &sealed).unwrap().counter, 7);
}
