// smarttag/src/device/builder.rs

use crate::device::handle::{Device, Uninitialized};
use crate::transport::Transport;
use crate::utils::DEFAULT_READ_TIMEOUT_MS;
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
pub struct DeviceBuilder {
    transport: Option<Box<dyn Transport>>,
    response_timeout_ms: u64,
}

impl Default for DeviceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceBuilder {
    pub fn new() -> Self {
        Self {
            transport: None,
            response_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Budget for every command response.
    pub fn response_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.response_timeout_ms = timeout_ms;
        self
    }

    /// Consume the builder and return an uninitialized Device.
    pub fn build_uninitialized(self) -> Result<Device<Uninitialized>> {
        let transport = self
            .transport
            .ok_or_else(|| Error::Config("no transport given".into()))?;
        let mut device = Device::new_with_transport(transport)?;
        device.set_response_timeout_ms(self.response_timeout_ms);
        Ok(device)
    }
}
