// smarttag/src/lib.rs

//! smarttag
//!
//! NFC smart-tag base station on a Sony RC-S956 front-end: hands out
//! encrypted one-time URLs to phones by Felica Push, Type-3 Tag emulation
//! and LLCP (SNEP / NPP).
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod crypto;
pub mod device;
pub mod error;
pub mod llcp;
pub mod prelude;
pub mod protocol;
pub mod records;
pub mod station;
pub mod store;
pub mod test_support;
pub mod transport;
pub mod type3;
pub mod types;
pub mod url;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
