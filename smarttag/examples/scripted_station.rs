//! Drive a station through one full cycle against a scripted front-end.
//!
//! A phone is polled and pushed a one-time URL, then a second phone reads
//! the Smart Poster over LLCP/SNEP. The pushed URL is verified with the
//! station key at the end, the way the web service would.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p smarttag --example scripted_station

use anyhow::{Context, Result, bail};
use hex_literal::hex;
use smarttag::device::rcs956::{
    IN_COMMUNICATE_THRU, IN_LIST_PASSIVE_TARGET, RF_CONFIGURATION, TG_GET_DEP_DATA,
    TG_INIT_AS_TARGET, TG_SET_DEP_DATA, TG_SET_GENERAL_BYTES, WRITE_REGISTER,
};
use smarttag::prelude::*;
use smarttag::test_support::{Script, initialized_mock_device, sent_commands};

const PHONE: [u8; 8] = hex!("012e4cd1a2b3c4d5");

fn script() -> Script {
    let mut found = hex!("01 01 12 01").to_vec();
    found.extend_from_slice(&PHONE);
    found.extend_from_slice(&hex!("0120220427 3f7fff"));
    let mut pushed = hex!("00 0a b1").to_vec();
    pushed.extend_from_slice(&PHONE);

    let mut atr_req = hex!("01 17 d4 00 00112233445566778899 00 00 00 32").to_vec();
    atr_req.extend_from_slice(&hex!("46666d 010110"));

    Script::new()
        // initiator
        .initiator_defaults()
        .reply(IN_LIST_PASSIVE_TARGET, &found)
        .reply(IN_COMMUNICATE_THRU, &pushed)
        .reply(RF_CONFIGURATION, &[])
        // target
        .reset()
        .target_setup()
        .response(TG_INIT_AS_TARGET, &atr_req)
        .reply(WRITE_REGISTER, &[0x00])
        .reply(WRITE_REGISTER, &[0x00])
        .reply(TG_SET_GENERAL_BYTES, &[0x00])
        .reply(TG_GET_DEP_DATA, &hex!("00 0000"))
        .reply(TG_SET_DEP_DATA, &[0x00])
        .reply(TG_GET_DEP_DATA, &hex!("00 8184"))
        .reply(TG_SET_DEP_DATA, &[0x00])
        .reply(TG_GET_DEP_DATA, &hex!("00 830401 1081 00000000"))
        .reply(TG_SET_DEP_DATA, &[0x00])
        .reply(TG_GET_DEP_DATA, &hex!("00 0000"))
        .reply(TG_SET_DEP_DATA, &[0x00])
        .reply(TG_GET_DEP_DATA, &hex!("00 81c4"))
}

fn main() -> Result<()> {
    env_logger::init();

    let identity = StationIdentity::new(
        hex!("f00000000000000a"),
        hex!("000102030405060708090a0b0c0d0e0f"),
    );
    let key = identity.station_key.clone();
    let store = MemoryStore::provisioned(identity);
    let config = StationConfig::default();
    let prefix = config.url_prefix.clone();

    let (device, shared) = initialized_mock_device(script())?;
    let mut station = Station::new(device, store, config)?;

    let report = station.run_cycle();
    println!("pushed: {}, target: {}", report.pushed, report.target);
    println!("urls issued: {}", station.store().counter());

    let push = sent_commands(&shared)
        .into_iter()
        .find(|c| c.get(1) == Some(&IN_COMMUNICATE_THRU))
        .context("no Felica Push was sent")?;
    // d4 42 | len b0 idm[8] data_len 01 02 param_len[2] url_len[2] url ...
    let packet = &push[2..];
    let url_len = u16::from_le_bytes([packet[15], packet[16]]) as usize;
    let url = std::str::from_utf8(&packet[17..17 + url_len])?;
    println!("pushed url: {}", url);

    let decoded = verify_url(&key, url, &prefix)?;
    if decoded.peer_id != Some(Idm::from_bytes(PHONE)) {
        bail!("url was not bound to the polled phone");
    }
    println!(
        "verified: station {} counter {} peer {}",
        decoded.station_id,
        decoded.counter,
        decoded.peer_id.map(|p| p.to_hex()).unwrap_or_default()
    );
    Ok(())
}
