// smarttag/src/type3/responder.rs

use log::{debug, warn};

use crate::protocol::parser::{byte_at, ensure_len, slice_at};
use crate::type3::{
    BLOCK_SIZE, FELICA_POLL, FELICA_POLL_RESP, FELICA_READ_RESP, FELICA_READ_WITHOUT_ENCRYPTION,
    MAX_BLOCKS_PER_READ, attribute_block, num_blocks,
};
use crate::types::{BlockData, Idm, Pmm, ServiceCode, SystemCode};
use crate::{Error, Result};

/// Offsets inside a Check (Read Without Encryption) command.
const READ_NUM_SERVICES: usize = 9;
const READ_SERVICE_CODE: usize = 10;
const READ_NUM_BLOCKS: usize = 12;
const READ_BLOCK_LIST: usize = 13;

/// Two byte block list element: access flag 0x80, then block number.
const BLOCK_ELEMENT_FLAG: u8 = 0x80;

/// Response to one initiator command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Type3Reply {
    /// Length-prefixed response; empty means stay silent.
    pub response: Vec<u8>,
    /// The record's last block is part of this response.
    pub read_complete: bool,
}

/// Answers SENSF_REQ and Check commands for one emulated tag.
#[derive(Debug, Clone)]
pub struct Type3Responder {
    idm: Idm,
    system_code: SystemCode,
}

fn reject(msg: impl Into<String>) -> Error {
    let msg = msg.into();
    warn!("type3: {}", msg);
    Error::ProtocolReject(msg)
}

impl Type3Responder {
    pub fn new(idm: Idm) -> Self {
        Self {
            idm,
            system_code: SystemCode::NDEF,
        }
    }

    pub fn idm(&self) -> &Idm {
        &self.idm
    }

    /// Compute the reply to `command` (starting with the command code, no
    /// length byte) while serving `record`.
    pub fn respond(&self, command: &[u8], record: &[u8]) -> Result<Type3Reply> {
        match byte_at(command, 0)? {
            FELICA_POLL => self.poll(command),
            FELICA_READ_WITHOUT_ENCRYPTION => self.read(command, record),
            other => Err(reject(format!("unsupported command {:#04x}", other))),
        }
    }

    // 0: 0x00, 1-2: system code, 3: request code, 4: time slot
    fn poll(&self, command: &[u8]) -> Result<Type3Reply> {
        ensure_len(command, 5).map_err(|_| reject("short polling command"))?;

        let requested = SystemCode::from_be_bytes([command[1], command[2]]);
        if requested != self.system_code && requested != SystemCode::ANY {
            debug!("type3: ignoring poll for system code {:#06x}", requested.as_u16());
            return Ok(Type3Reply::default());
        }

        let mut resp = vec![0x00, FELICA_POLL_RESP];
        resp.extend_from_slice(self.idm.as_bytes());
        resp.extend_from_slice(Pmm::TAG.as_bytes());
        if command[3] == 0x01 {
            resp.extend_from_slice(&self.system_code.to_be_bytes());
        }
        resp[0] = resp.len() as u8;
        debug!("type3: poll answered");
        Ok(Type3Reply {
            response: resp,
            read_complete: false,
        })
    }

    fn read(&self, command: &[u8], record: &[u8]) -> Result<Type3Reply> {
        ensure_len(command, READ_BLOCK_LIST).map_err(|_| reject("short check command"))?;

        if command[READ_NUM_SERVICES] != 1 {
            return Err(reject(format!(
                "{} services requested",
                command[READ_NUM_SERVICES]
            )));
        }
        let service =
            ServiceCode::from_le_bytes([command[READ_SERVICE_CODE], command[READ_SERVICE_CODE + 1]]);
        if service != ServiceCode::NDEF_READ {
            return Err(reject(format!("service {:#06x}", service.as_u16())));
        }

        let count = command[READ_NUM_BLOCKS] as usize;
        if count == 0 || count > MAX_BLOCKS_PER_READ {
            return Err(reject(format!("{} blocks requested", count)));
        }
        let list = slice_at(command, READ_BLOCK_LIST, 2 * count)
            .map_err(|_| reject("truncated block list"))?;
        if list.chunks_exact(2).any(|e| e[0] != BLOCK_ELEMENT_FLAG) {
            return Err(reject("unsupported block list element"));
        }

        let mut resp = vec![0x00, FELICA_READ_RESP];
        resp.extend_from_slice(&command[1..9]);
        resp.extend_from_slice(&[0x00, 0x00, count as u8]);

        if count == 1 && list[1] == 0 {
            resp.extend_from_slice(&attribute_block(record.len()));
            resp[0] = resp.len() as u8;
            debug!("type3: attribute block read");
            return Ok(Type3Reply {
                response: resp,
                read_complete: false,
            });
        }

        let total = num_blocks(record.len());
        let mut read_complete = false;
        for element in list.chunks_exact(2) {
            // block 0 is the attribute block, data starts at 1
            let index = match (element[1] as usize).checked_sub(1) {
                Some(i) if i < total => i,
                _ => return Err(reject(format!("block {} out of range", element[1]))),
            };
            let start = index * BLOCK_SIZE;
            let end = (start + BLOCK_SIZE).min(record.len());
            resp.extend_from_slice(BlockData::padded(&record[start..end]).as_bytes());
            if index == total - 1 {
                read_complete = true;
            }
        }
        resp[0] = resp.len() as u8;
        debug!(
            "type3: read {} block(s){}",
            count,
            if read_complete { ", record complete" } else { "" }
        );
        Ok(Type3Reply {
            response: resp,
            read_complete,
        })
    }
}
