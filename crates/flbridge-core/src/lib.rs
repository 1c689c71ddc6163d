//! Window-message bridge to a running FL Studio instance.
//!
//! The bridge locates the external application's top-level window, gates
//! every operation behind a connected flag, and forwards opaque tagged byte
//! buffers via the platform's inter-process data message. Everything beyond
//! discovery, the flag, and raw delivery is a documented placeholder: no
//! protocol exists for live tempo/key queries or sample loading, so those
//! operations report success without side effects.

pub mod bridge;
pub mod config;
pub mod discovery;
pub mod error;
pub mod message;
pub mod transport;
#[cfg(windows)]
pub mod win32;

pub use bridge::{StudioBridge, DEFAULT_KEY, DEFAULT_TEMPO};
pub use config::{BridgeConfig, DEFAULT_WINDOW_CLASS, WINDOW_CLASS_ENV};
pub use discovery::{FixedDiscovery, TargetDiscovery, UnsupportedDiscovery, WindowRef};
pub use error::BridgeError;
pub use message::DataMessage;
pub use transport::{ChannelTransport, Delivery, MessageTransport, UnsupportedTransport};
