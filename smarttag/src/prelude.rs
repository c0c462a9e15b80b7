// smarttag/src/prelude.rs

pub use crate::config::{StationConfig, StationConfigBuilder};
pub use crate::device::{Device, DeviceBuilder, Initialized, Uninitialized};
pub use crate::llcp::{DeliveryMode, LlcpSession, LlcpState, PushDelivery};
pub use crate::records::{UrlSource, felica_push_url, smart_poster, static_url};
pub use crate::station::{CycleReport, Station, TargetOutcome};
pub use crate::store::{MemoryStore, SharedStore, StationStore};
pub use crate::transport::{MockTransport, Transport};
pub use crate::type3::{Type3Reply, Type3Responder};
pub use crate::url::{DecodedUrl, StationUrl, TelemetrySnapshot, UrlBuilder, verify_url};
pub use crate::{
    BlockData, Error, Idm, Pmm, Result, ServiceCode, StationId, StationIdentity, StationKey,
    SystemCode,
};

// Re-export small utilities for convenience
pub use crate::utils::{Hex, bytes_to_hex, bytes_to_hex_spaced, ms, parse_hex};
