#[path = "../common/mod.rs"]
mod common;

use hex_literal::hex;
use smarttag::constants::URL_PREFIX;
use smarttag::device::rcs956::{COMMUNICATE_THRU_EX, TG_INIT_AS_TARGET};
use smarttag::prelude::*;
use smarttag::test_support::{Script, initialized_mock_device, sent_commands};
use smarttag::type3::{MAX_BLOCKS_PER_READ, num_blocks};

/// FeliCa 212 kbps activation carrying a poll for the NDEF system code.
const ACTIVATION: [u8; 7] = hex!("22 06 00 12fc 01 00");

/// The poster the station will serve, computed on a copy of the store.
fn expected_poster(store: &MemoryStore) -> Vec<u8> {
    let config = common::fixtures::config();
    let builder = UrlBuilder::from_config(&config);
    let mut shadow = store.clone();
    let mut url = StationUrl::new(&builder, &mut shadow, None);
    smart_poster(config.poster_label.as_deref(), &mut url).unwrap()
}

fn status_and(command: Vec<u8>) -> Vec<u8> {
    let mut data = vec![0x00];
    data.extend_from_slice(&command);
    data
}

#[test]
fn phone_reads_the_whole_poster() {
    common::init_logger();
    let store = common::fixtures::store();
    let record = expected_poster(&store);
    let idm = common::fixtures::card_idm();

    let blocks: Vec<u8> = (1..=num_blocks(record.len()) as u8).collect();
    let mut script = Script::new()
        .target_setup()
        .response(TG_INIT_AS_TARGET, &ACTIVATION)
        .reply(
            COMMUNICATE_THRU_EX,
            &status_and(common::fixtures::check_command(&idm, &[0])),
        );
    for chunk in blocks.chunks(MAX_BLOCKS_PER_READ) {
        script = script.reply(
            COMMUNICATE_THRU_EX,
            &status_and(common::fixtures::check_command(&idm, chunk)),
        );
    }
    // the reader goes quiet after the last block
    let script = script.reply(COMMUNICATE_THRU_EX, &[0x00]);

    let (device, shared) = initialized_mock_device(script).unwrap();
    let mut station = Station::new(device, store, common::fixtures::config()).unwrap();
    assert_eq!(station.run_target_session(), TargetOutcome::Complete);
    assert_eq!(station.store().counter(), 1);

    let replies: Vec<Vec<u8>> = sent_commands(&shared)
        .into_iter()
        .filter(|c| c[1] == COMMUNICATE_THRU_EX)
        .map(|c| c[4..].to_vec())
        .collect();
    assert_eq!(replies.len(), 2 + blocks.chunks(MAX_BLOCKS_PER_READ).count());

    // polling response
    assert_eq!(replies[0][1], 0x01);
    assert_eq!(&replies[0][2..10], idm.as_bytes());

    let served: Vec<u8> = replies[2..].iter().flat_map(|r| r[13..].to_vec()).collect();
    assert_eq!(&served[..record.len()], &record[..]);

    let url_len = station.url_builder().url_len(0);
    let url = std::str::from_utf8(&record[record.len() - url_len..]).unwrap();
    let decoded = verify_url(&common::fixtures::identity().station_key, url, URL_PREFIX).unwrap();
    assert_eq!(decoded.counter, 1);
    assert_eq!(decoded.peer_id, None);
}

#[test]
fn unsupported_command_ends_the_session() {
    let idm = common::fixtures::card_idm();
    let mut write = vec![0x00, 0x08];
    write.extend_from_slice(idm.as_bytes());
    write[0] = write.len() as u8;
    let script = Script::new()
        .target_setup()
        .response(TG_INIT_AS_TARGET, &ACTIVATION)
        .reply(COMMUNICATE_THRU_EX, &status_and(write));

    let (device, shared) = initialized_mock_device(script).unwrap();
    let mut station =
        Station::new(device, common::fixtures::store(), common::fixtures::config()).unwrap();
    assert_eq!(station.run_target_session(), TargetOutcome::Retry);
    assert_eq!(shared.with(|m| m.pending()), 0);
}

#[test]
fn unprovisioned_station_reports_error() {
    let script = Script::new()
        .target_setup()
        .response(TG_INIT_AS_TARGET, &ACTIVATION);
    let (device, _) = initialized_mock_device(script).unwrap();
    let mut station =
        Station::new(device, MemoryStore::new(), common::fixtures::config()).unwrap();
    assert_eq!(station.run_target_session(), TargetOutcome::Error);
    // not a transport failure
    assert_eq!(station.store().telemetry().unwrap().serial_failures, None);
}
