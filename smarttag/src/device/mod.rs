// smarttag/src/device/mod.rs

pub mod builder;
pub mod handle;
pub mod rcs956;

pub use builder::DeviceBuilder;
pub use handle::{Device, Initialized, Uninitialized};
