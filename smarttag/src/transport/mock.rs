// smarttag/src/transport/mock.rs

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Mock transport for unit tests. It records sent packets and the
/// timeout of every receive, and returns queued responses in order.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<Vec<u8>>,
    pub responses: VecDeque<Vec<u8>>,
    pub timeouts: Vec<u64>,
    pub resets: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(resp);
    }

    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }

    /// Responses not consumed yet.
    pub fn pending(&self) -> usize {
        self.responses.len()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>> {
        self.timeouts.push(timeout_ms);
        self.responses.pop_front().ok_or(Error::Timeout)
    }

    fn reset(&mut self) -> Result<()> {
        // queued responses survive so tests can script a whole run up front
        self.resets += 1;
        Ok(())
    }
}

/// Transport handle over a shared [`MockTransport`], so a test can inspect
/// traffic after handing the transport to a `Device`.
#[derive(Debug, Clone, Default)]
pub struct SharedTransport {
    inner: Rc<RefCell<MockTransport>>,
}

impl SharedTransport {
    pub fn new(mock: MockTransport) -> Self {
        Self {
            inner: Rc::new(RefCell::new(mock)),
        }
    }

    /// Run `f` against the underlying mock.
    pub fn with<R>(&self, f: impl FnOnce(&mut MockTransport) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.inner.borrow().sent.clone()
    }
}

impl Transport for SharedTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.inner.borrow_mut().send(data)
    }

    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>> {
        self.inner.borrow_mut().receive(timeout_ms)
    }

    fn reset(&mut self) -> Result<()> {
        self.inner.borrow_mut().reset()
    }
}
