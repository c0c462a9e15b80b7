// smarttag/src/protocol/mod.rs

//! Wire-level helpers: RC-S956 host packet framing, checksums and bounds
//! checked readers.

pub mod checksum;
pub mod frame;
pub mod parser;

pub use checksum::{dcs, lcs, neg_sum16, sum16};
pub use frame::Frame;
