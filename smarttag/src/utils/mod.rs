//! Utilities for smarttag: hex rendering for logs and timeout helpers.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
