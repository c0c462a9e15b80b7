// fixtures.rs: station identities, stores and front-end replies used across tests

use hex_literal::hex;
use smarttag::config::StationConfig;
use smarttag::store::MemoryStore;
use smarttag::types::{Idm, StationIdentity};

pub const STATION_ID: [u8; 8] = hex!("f00000000000000a");
pub const STATION_KEY: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");
pub const CARD_IDM: [u8; 8] = hex!("0101010101010101");
pub const PHONE_IDM: [u8; 8] = hex!("012e4cd1a2b3c4d5");

pub fn identity() -> StationIdentity {
    StationIdentity::new(STATION_ID, STATION_KEY)
}

pub fn store() -> MemoryStore {
    MemoryStore::provisioned(identity())
}

pub fn card_idm() -> Idm {
    Idm::from_bytes(CARD_IDM)
}

pub fn phone_idm() -> Idm {
    Idm::from_bytes(PHONE_IDM)
}

/// Defaults with a fixed card IDm so replies can be predicted.
pub fn config() -> StationConfig {
    StationConfig::builder().card_idm(card_idm()).build().unwrap()
}

/// InListPassiveTarget data for one phone found with [`PHONE_IDM`].
pub fn phone_found() -> Vec<u8> {
    let mut data = hex!("01 01 12 01").to_vec();
    data.extend_from_slice(&PHONE_IDM);
    data.extend_from_slice(&hex!("0120220427 3f7fff"));
    data
}

/// InCommunicateThru data carrying a Felica Push response.
pub fn push_response(status: u8) -> Vec<u8> {
    let mut data = vec![status, 0x0a, 0xb1];
    data.extend_from_slice(&PHONE_IDM);
    data
}

/// TgInitAsTarget activation carrying an ATR_REQ with LLCP general bytes.
pub fn llcp_atr_req() -> Vec<u8> {
    let mut data = hex!("01 17 d4 00 00112233445566778899 00 00 00 32").to_vec();
    data.extend_from_slice(&hex!("46666d 010110"));
    data
}

/// Type-3 Check command for `blocks` of the NDEF service, length prefixed.
pub fn check_command(idm: &Idm, blocks: &[u8]) -> Vec<u8> {
    let mut cmd = vec![0x00, 0x06];
    cmd.extend_from_slice(idm.as_bytes());
    cmd.extend_from_slice(&[0x01, 0x0b, 0x00, blocks.len() as u8]);
    for &b in blocks {
        cmd.extend_from_slice(&[0x80, b]);
    }
    cmd[0] = cmd.len() as u8;
    cmd
}

/// Extract the URL from a Felica Push packet.
pub fn push_packet_url(packet: &[u8]) -> String {
    let url_len = u16::from_le_bytes([packet[15], packet[16]]) as usize;
    String::from_utf8(packet[17..17 + url_len].to_vec()).unwrap()
}
