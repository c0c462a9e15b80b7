// smarttag/src/device/handle.rs

use std::marker::PhantomData;

use log::{debug, trace, warn};

use crate::constants::RCS956_CMD_PREFIX_DEVICE;
use crate::device::rcs956;
use crate::protocol::Frame;
use crate::protocol::parser::{byte_at, expect_byte, idm_at, pmm_at};
use crate::transport::Transport;
use crate::types::{Idm, Pmm, SystemCode};
use crate::utils::{DEFAULT_READ_TIMEOUT_MS, Deadline, Hex};
use crate::{Error, Result};

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized;

/// RC-S956 handle that enforces initialization state at compile time.
pub struct Device<State = Uninitialized> {
    transport: Box<dyn Transport>,
    response_timeout_ms: u64,
    _state: PhantomData<State>,
}

impl<State> Device<State> {
    /// Budget for a command's response frame.
    pub fn response_timeout_ms(&self) -> u64 {
        self.response_timeout_ms
    }

    pub(crate) fn set_response_timeout_ms(&mut self, timeout_ms: u64) {
        self.response_timeout_ms = timeout_ms;
    }

    /// Send a command frame and wait for the front-end's ACK.
    fn send_command(&mut self, payload: &[u8]) -> Result<()> {
        let frame = Frame::encode(payload)?;
        trace!("rcs956 >> {}", Hex(&frame));
        self.transport.send(&frame)?;

        let ack = self.transport.receive(self.response_timeout_ms)?;
        if !Frame::is_ack(&ack) {
            return Err(Error::UnexpectedReply(format!("expected ACK, got {}", Hex(&ack))));
        }
        Ok(())
    }

    /// Read the response frame of command `cmd`; returns the bytes after
    /// `D5 cmd+1`.
    fn read_response(&mut self, cmd: u8, timeout_ms: u64) -> Result<Vec<u8>> {
        let raw = self.transport.receive(timeout_ms)?;
        self.decode_response(cmd, &raw)
    }

    fn decode_response(&self, cmd: u8, raw: &[u8]) -> Result<Vec<u8>> {
        trace!("rcs956 << {}", Hex(raw));
        let payload = Frame::decode(raw)?;
        expect_byte(&payload, 0, RCS956_CMD_PREFIX_DEVICE)?;
        expect_byte(&payload, 1, cmd.wrapping_add(1))?;
        Ok(payload[2..].to_vec())
    }

    /// Abort the pending command by sending an ACK.
    fn cancel(&mut self) -> Result<()> {
        trace!("rcs956 >> ack (cancel)");
        self.transport.send(&Frame::ack())
    }

    fn reset_sequence(&mut self) -> Result<()> {
        self.send_command(&rcs956::reset())?;
        self.read_response(rcs956::RESET, self.response_timeout_ms)?;
        // the reset only takes effect once acknowledged
        self.cancel()
    }
}

impl Device<Uninitialized> {
    /// Create a Device from an existing Transport instance, e.g. a
    /// MockTransport in tests.
    pub fn new_with_transport(transport: Box<dyn Transport>) -> Result<Self> {
        Ok(Self {
            transport,
            response_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            _state: PhantomData,
        })
    }

    /// Reset the link and the front-end. Returns an initialized Device on
    /// success.
    pub fn initialize(mut self) -> Result<Device<Initialized>> {
        self.transport.reset()?;
        self.reset_sequence()?;
        debug!("rcs956: initialized");

        Ok(Device {
            transport: self.transport,
            response_timeout_ms: self.response_timeout_ms,
            _state: PhantomData,
        })
    }
}

impl Device<Initialized> {
    /// Execute a raw `D4 cmd ...` payload and return the response data
    /// after `D5 cmd+1`.
    pub fn execute(&mut self, payload: &[u8], timeout_ms: u64) -> Result<Vec<u8>> {
        let cmd = byte_at(payload, 1)?;
        self.send_command(payload)?;
        self.read_response(cmd, timeout_ms)
    }

    fn command(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        self.execute(payload, self.response_timeout_ms)
    }

    fn expect_ok(&mut self, payload: &[u8]) -> Result<()> {
        let data = self.command(payload)?;
        match byte_at(&data, 0)? {
            0x00 => Ok(()),
            status => {
                warn!("rcs956: command {:#04x} failed with {:#04x}", payload[1], status);
                Err(Error::DeviceStatus(status))
            }
        }
    }

    /// Reset the front-end (Reset + ACK).
    pub fn reset(&mut self) -> Result<()> {
        self.reset_sequence()
    }

    pub fn write_register(&mut self, addr: u16, value: u8) -> Result<()> {
        self.expect_ok(&rcs956::write_register(addr, value))
    }

    pub fn set_parameters(&mut self, flags: u8) -> Result<()> {
        self.command(&rcs956::set_parameters(flags)).map(|_| ())
    }

    /// Enter target mode. Only the ACK is read here; the response arrives
    /// once an initiator activates us (see [`Self::wait_for_initiator`]).
    pub fn tg_init_as_target(&mut self, idm: &Idm) -> Result<()> {
        self.send_command(&rcs956::tg_init_as_target(idm))
    }

    /// Wait for the TgInitAsTarget response. `None` when no initiator
    /// showed up in time; the pending command is then cancelled.
    pub fn wait_for_initiator(&mut self, timeout_ms: u64) -> Result<Option<Vec<u8>>> {
        let deadline = Deadline::after_ms(timeout_ms);
        loop {
            match self.transport.receive(deadline.remaining_ms()) {
                // a late ACK is not the activation we are waiting for
                Ok(raw) if Frame::is_ack(&raw) => {
                    if deadline.expired() {
                        break;
                    }
                }
                Ok(raw) => return self.decode_response(rcs956::TG_INIT_AS_TARGET, &raw).map(Some),
                Err(Error::Timeout) => break,
                Err(e) => return Err(e),
            }
        }
        debug!("rcs956: no initiator within {} ms", timeout_ms);
        self.cancel()?;
        Ok(None)
    }

    pub fn tg_set_general_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.expect_ok(&rcs956::tg_set_general_bytes(bytes))
    }

    /// Receive a DEP_REQ. Data is `status | payload`.
    pub fn tg_get_dep_data(&mut self) -> Result<Vec<u8>> {
        self.command(&rcs956::tg_get_dep_data())
    }

    /// Send a DEP_RES, returning the front-end status byte.
    pub fn tg_set_dep_data(&mut self, data: &[u8]) -> Result<u8> {
        let resp = self.command(&rcs956::tg_set_dep_data(data))?;
        byte_at(&resp, 0)
    }

    /// Send a raw response to the initiator and wait for its next command.
    /// Data is `status | len | command ...`.
    pub fn comm_thru_ex(&mut self, data: &[u8], timeout_ms: u16) -> Result<Vec<u8>> {
        self.command(&rcs956::communicate_thru_ex(data, timeout_ms))
    }

    pub fn rf_off(&mut self) -> Result<()> {
        self.command(&rcs956::rf_off()).map(|_| ())
    }

    pub fn set_retry(&mut self, retry: u8) -> Result<()> {
        self.command(&rcs956::set_retry(retry)).map(|_| ())
    }

    pub fn set_retry_com(&mut self, retry: u8) -> Result<()> {
        self.command(&rcs956::set_retry_com(retry)).map(|_| ())
    }

    pub fn set_timeout(&mut self, timeout: u8) -> Result<()> {
        self.command(&rcs956::set_timeout(timeout)).map(|_| ())
    }

    /// Poll for one FeliCa target. `None` when nothing answered.
    ///
    /// Data: `NbTg | Tg | len | 01 | IDm | PMm ...`
    pub fn in_list_passive_target(&mut self, system_code: SystemCode) -> Result<Option<(Idm, Pmm)>> {
        let data = self.command(&rcs956::in_list_passive_target(system_code))?;
        if byte_at(&data, 0)? != 0x01 {
            return Ok(None);
        }
        Ok(Some((idm_at(&data, 4)?, pmm_at(&data, 12)?)))
    }

    /// Exchange a raw FeliCa packet with the polled target.
    /// Data is `status | response ...`.
    pub fn in_communicate_thru(&mut self, data: &[u8], timeout_ms: u64) -> Result<Vec<u8>> {
        self.execute(&rcs956::in_communicate_thru(data), timeout_ms)
    }
}
