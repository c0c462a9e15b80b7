//! Timeouts used when talking to the front-end.
//!
//! Every receive carries a millisecond budget; `Deadline` spreads one budget
//! across several receives (e.g. waiting for an initiator while discarding
//! stray frames).

use std::time::{Duration, Instant};

/// Default budget for a command response from the front-end.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 3000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// A fixed point in time after which waiting must stop.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    end: Instant,
}

impl Deadline {
    pub fn after_ms(budget_ms: u64) -> Self {
        Self {
            end: Instant::now() + ms(budget_ms),
        }
    }

    /// Milliseconds left, zero once expired.
    pub fn remaining_ms(&self) -> u64 {
        let left = self.end.saturating_duration_since(Instant::now());
        u64::try_from(left.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn expired(&self) -> bool {
        self.remaining_ms() == 0
    }
}
