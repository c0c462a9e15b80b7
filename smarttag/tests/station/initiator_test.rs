#[path = "../common/mod.rs"]
mod common;

use smarttag::device::rcs956::{IN_COMMUNICATE_THRU, IN_LIST_PASSIVE_TARGET, RF_CONFIGURATION};
use smarttag::prelude::*;
use smarttag::test_support::{Script, initialized_mock_device, sent_commands};

fn push_script() -> Script {
    Script::new()
        .initiator_defaults()
        .reply(IN_LIST_PASSIVE_TARGET, &common::fixtures::phone_found())
        .reply(IN_COMMUNICATE_THRU, &common::fixtures::push_response(0x00))
        .reply(RF_CONFIGURATION, &[])
}

#[test]
fn pushed_url_is_bound_to_the_phone() {
    common::init_logger();
    let (device, shared) = initialized_mock_device(push_script()).unwrap();
    let config = common::fixtures::config();
    let prefix = config.url_prefix.clone();
    let mut station = Station::new(device, common::fixtures::store(), config).unwrap();

    assert!(station.run_initiator().unwrap());

    let push = sent_commands(&shared)
        .into_iter()
        .find(|c| c[1] == IN_COMMUNICATE_THRU)
        .unwrap();
    let url = common::fixtures::push_packet_url(&push[2..]);
    let decoded = verify_url(&common::fixtures::identity().station_key, &url, &prefix).unwrap();
    assert_eq!(decoded.peer_id, Some(common::fixtures::phone_idm()));
    assert_eq!(decoded.counter, 1);
    assert_eq!(decoded.station_id, common::fixtures::identity().station_id);
}

#[test]
fn cycle_pushes_then_offers_the_tag() {
    let script = push_script().reset().target_setup();
    let (device, _) = initialized_mock_device(script).unwrap();
    let mut station =
        Station::new(device, common::fixtures::store(), common::fixtures::config()).unwrap();

    let report = station.run_cycle();
    assert_eq!(
        report,
        CycleReport {
            pushed: true,
            target: TargetOutcome::Timeout,
        }
    );
    assert_eq!(station.store().counter(), 1);
}

#[test]
fn telemetry_travels_in_the_url() {
    let telemetry = TelemetrySnapshot {
        power_on_resets: Some(3),
        battery_voltage: Some(0x3e),
        ..Default::default()
    };
    let store = common::fixtures::store().with_telemetry(telemetry);
    let (device, shared) = initialized_mock_device(push_script()).unwrap();
    let config = common::fixtures::config();
    let prefix = config.url_prefix.clone();
    let mut station = Station::new(device, store, config).unwrap();

    assert!(station.run_initiator().unwrap());
    let push = sent_commands(&shared)
        .into_iter()
        .find(|c| c[1] == IN_COMMUNICATE_THRU)
        .unwrap();
    let url = common::fixtures::push_packet_url(&push[2..]);
    let decoded = verify_url(&common::fixtures::identity().station_key, &url, &prefix).unwrap();
    assert_eq!(decoded.telemetry, telemetry);
}
