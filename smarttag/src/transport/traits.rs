// smarttag/src/transport/traits.rs

use crate::Result;

/// Byte link to the RC-S956 front-end (UART on the station, USB on a
/// PaSoRi). Device logic never touches the port directly.
pub trait Transport {
    /// Send raw bytes to the front-end
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive one packet, waiting at most `timeout_ms`.
    /// Implementations return `Error::Timeout` when nothing arrives.
    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>>;

    /// Drop buffered input and bring the link back to a known state.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }
}
