//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers script RC-S956 exchanges on a MockTransport so tests
//! across the crate and the tests/ directory share the same framing.
#![allow(dead_code)]

use crate::constants::RCS956_CMD_PREFIX_DEVICE;
use crate::device::{self, rcs956};
use crate::protocol::Frame;
use crate::transport::{MockTransport, SharedTransport};
use crate::Result;

/// Framed `D5 cmd+1 data...` response to command `cmd`.
#[doc(hidden)]
pub fn response_frame(cmd: u8, data: &[u8]) -> Vec<u8> {
    let mut payload = vec![RCS956_CMD_PREFIX_DEVICE, cmd.wrapping_add(1)];
    payload.extend_from_slice(data);
    match Frame::encode(&payload) {
        Ok(frame) => frame,
        Err(e) => panic!("test response too long: {e}"),
    }
}

/// ACK followed by the response frame, as read after every command.
#[doc(hidden)]
pub fn ack_and_response(cmd: u8, data: &[u8]) -> Vec<Vec<u8>> {
    vec![Frame::ack().to_vec(), response_frame(cmd, data)]
}

/// Ordered list of frames the front-end will deliver.
#[doc(hidden)]
#[derive(Debug, Default, Clone)]
pub struct Script {
    frames: Vec<Vec<u8>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// ACK plus response data for `cmd`.
    pub fn reply(mut self, cmd: u8, data: &[u8]) -> Self {
        self.frames.extend(ack_and_response(cmd, data));
        self
    }

    /// Only an ACK (TgInitAsTarget, or a command left unanswered).
    pub fn ack(mut self) -> Self {
        self.frames.push(Frame::ack().to_vec());
        self
    }

    /// Only a response frame (the activation after TgInitAsTarget).
    pub fn response(mut self, cmd: u8, data: &[u8]) -> Self {
        self.frames.push(response_frame(cmd, data));
        self
    }

    pub fn raw(mut self, frame: Vec<u8>) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn reset(self) -> Self {
        self.reply(rcs956::RESET, &[])
    }

    /// WriteRegister, SetParameters and the TgInitAsTarget ACK.
    pub fn target_setup(self) -> Self {
        self.reply(rcs956::WRITE_REGISTER, &[0x00])
            .reply(rcs956::SET_PARAMETERS, &[0x00])
            .ack()
    }

    /// The four RFConfiguration commands applied before polling.
    pub fn initiator_defaults(self) -> Self {
        (0..4).fold(self, |s, _| s.reply(rcs956::RF_CONFIGURATION, &[]))
    }

    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    pub fn into_mock(self) -> MockTransport {
        let mut mock = MockTransport::new();
        mock.responses.extend(self.frames);
        mock
    }
}

/// Create and initialize a Device backed by a shared MockTransport. The
/// initial Reset exchange is prepended to `script`.
#[doc(hidden)]
pub fn initialized_mock_device(
    script: Script,
) -> Result<(device::Device<device::Initialized>, SharedTransport)> {
    let mut full = Script::new().reset();
    full.frames.extend(script.frames);
    let shared = SharedTransport::new(full.into_mock());
    let device = device::Device::new_with_transport(Box::new(shared.clone()))?;
    Ok((device.initialize()?, shared))
}

/// Decode every sent command frame (ACKs skipped) into its `D4 ...` payload.
#[doc(hidden)]
pub fn sent_commands(shared: &SharedTransport) -> Vec<Vec<u8>> {
    shared
        .sent()
        .iter()
        .filter(|f| !Frame::is_ack(f))
        .filter_map(|f| Frame::decode(f).ok())
        .collect()
}
