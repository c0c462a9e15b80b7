// smarttag/src/transport/mod.rs

pub mod mock;
pub mod traits;

pub use mock::{MockTransport, SharedTransport};
pub use traits::Transport;
