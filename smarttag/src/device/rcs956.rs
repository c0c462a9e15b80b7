// smarttag/src/device/rcs956.rs

//! RC-S956 command payloads (`D4 cmd ...`, before host-packet framing).

use crate::constants::RCS956_CMD_PREFIX_HOST as CMD;
use crate::types::{Idm, Pmm, SystemCode};

pub const WRITE_REGISTER: u8 = 0x08;
pub const SET_PARAMETERS: u8 = 0x12;
pub const RESET: u8 = 0x18;
pub const RF_CONFIGURATION: u8 = 0x32;
pub const IN_COMMUNICATE_THRU: u8 = 0x42;
pub const IN_LIST_PASSIVE_TARGET: u8 = 0x4a;
pub const TG_GET_DEP_DATA: u8 = 0x86;
pub const TG_INIT_AS_TARGET: u8 = 0x8c;
pub const TG_SET_DEP_DATA: u8 = 0x8e;
pub const TG_SET_GENERAL_BYTES: u8 = 0x92;
pub const COMMUNICATE_THRU_EX: u8 = 0xa0;

/// RFConfiguration items
const RF_ITEM_FIELD: u8 = 0x01;
const RF_ITEM_TIMEOUT: u8 = 0x02;
const RF_ITEM_RETRY_COM: u8 = 0x04;
const RF_ITEM_RETRY: u8 = 0x05;

/// Default PSL_RES / ATR_RES timeouts kept by `set_timeout`
const RF_DEFAULT_ATR_TIMEOUT: u8 = 0x0b;

/// Status byte of a CommunicateThruEX reply once the initiator released us.
pub const STATUS_CLOSED: u8 = 0x31;

/// Register controlling the target-mode analog settings.
pub const REG_TARGET_CONFIG: u16 = 0x630d;
/// Register toggled to disable the 106 kbps optimisation.
pub const REG_TARGET_106K: u16 = 0x6301;

/// SetParameters flags used in target mode: no automatic ATR_RES
pub const TARGET_PARAMETERS: u8 = 0x18;

pub fn reset() -> Vec<u8> {
    vec![CMD, RESET, 0x01]
}

pub fn write_register(addr: u16, value: u8) -> Vec<u8> {
    let [hi, lo] = addr.to_be_bytes();
    vec![CMD, WRITE_REGISTER, hi, lo, value]
}

pub fn set_parameters(flags: u8) -> Vec<u8> {
    vec![CMD, SET_PARAMETERS, flags]
}

/// TgInitAsTarget with FeliCa parameters for `idm`; the PMm and the NDEF
/// system code are fixed, NFCID3 is left zero.
pub fn tg_init_as_target(idm: &Idm) -> Vec<u8> {
    let mut v = vec![
        CMD,
        TG_INIT_AS_TARGET,
        0x00, // mode: no restriction
        0x01, 0x01, // SENS_RES
        0x00, 0x00, 0x00, // NFCID1
        0x40, // SEL_RES
    ];
    v.extend_from_slice(idm.as_bytes());
    v.extend_from_slice(Pmm::TAG.as_bytes());
    v.extend_from_slice(&SystemCode::NDEF.to_be_bytes());
    v.extend_from_slice(&[0u8; 10]);
    v
}

pub fn tg_set_general_bytes(bytes: &[u8]) -> Vec<u8> {
    with_data(TG_SET_GENERAL_BYTES, bytes)
}

pub fn tg_get_dep_data() -> Vec<u8> {
    vec![CMD, TG_GET_DEP_DATA]
}

pub fn tg_set_dep_data(data: &[u8]) -> Vec<u8> {
    with_data(TG_SET_DEP_DATA, data)
}

/// CommunicateThruEX: `timeout_ms` (LE16, 0 = none) then the raw response.
pub fn communicate_thru_ex(data: &[u8], timeout_ms: u16) -> Vec<u8> {
    let mut v = vec![CMD, COMMUNICATE_THRU_EX];
    v.extend_from_slice(&timeout_ms.to_le_bytes());
    v.extend_from_slice(data);
    v
}

pub fn rf_off() -> Vec<u8> {
    vec![CMD, RF_CONFIGURATION, RF_ITEM_FIELD, 0x00]
}

/// Retry counts for ATR_REQ and InListPassiveTarget (PSL_REQ stays default).
pub fn set_retry(retry: u8) -> Vec<u8> {
    vec![CMD, RF_CONFIGURATION, RF_ITEM_RETRY, retry, 0x00, retry]
}

pub fn set_retry_com(retry: u8) -> Vec<u8> {
    vec![CMD, RF_CONFIGURATION, RF_ITEM_RETRY_COM, retry]
}

/// Communication timeout, `50us * 2^(timeout - 1)`.
pub fn set_timeout(timeout: u8) -> Vec<u8> {
    vec![
        CMD,
        RF_CONFIGURATION,
        RF_ITEM_TIMEOUT,
        RF_DEFAULT_ATR_TIMEOUT,
        RF_DEFAULT_ATR_TIMEOUT,
        timeout,
    ]
}

/// FeliCa polling of one target at 212 kbps.
pub fn in_list_passive_target(system_code: SystemCode) -> Vec<u8> {
    let [hi, lo] = system_code.to_be_bytes();
    vec![CMD, IN_LIST_PASSIVE_TARGET, 0x01, 0x01, 0x00, hi, lo, 0x00, 0x00]
}

pub fn in_communicate_thru(data: &[u8]) -> Vec<u8> {
    with_data(IN_COMMUNICATE_THRU, data)
}

fn with_data(cmd: u8, data: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(2 + data.len());
    v.push(CMD);
    v.push(cmd);
    v.extend_from_slice(data);
    v
}
