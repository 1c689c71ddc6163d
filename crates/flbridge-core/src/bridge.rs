use std::path::Path;

use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::discovery::{TargetDiscovery, WindowRef};
use crate::message::DataMessage;
use crate::transport::MessageTransport;

/// Tempo reported while no live query protocol exists.
pub const DEFAULT_TEMPO: f32 = 120.0;

/// Musical key reported while no live query protocol exists.
pub const DEFAULT_KEY: &str = "C";

#[cfg(windows)]
fn platform_discovery() -> Box<dyn TargetDiscovery> {
    Box::new(crate::win32::Win32Discovery)
}

#[cfg(not(windows))]
fn platform_discovery() -> Box<dyn TargetDiscovery> {
    Box::new(crate::discovery::UnsupportedDiscovery)
}

#[cfg(windows)]
fn platform_transport() -> Box<dyn MessageTransport> {
    Box::new(crate::win32::Win32Transport)
}

#[cfg(not(windows))]
fn platform_transport() -> Box<dyn MessageTransport> {
    Box::new(crate::transport::UnsupportedTransport)
}

/// Handle bridging this process to a running external application instance.
///
/// The handle is single-threaded and synchronous: callers invoking it from
/// several threads must synchronize externally. The connected flag is a gate
/// derived from the last discovery attempt, not a live health check; it can
/// go stale if the external process exits.
pub struct StudioBridge {
    config: BridgeConfig,
    discovery: Box<dyn TargetDiscovery>,
    transport: Box<dyn MessageTransport>,
    window: Option<WindowRef>,
    connected: bool,
    tempo: f32,
    key: String,
}

impl StudioBridge {
    /// Create a handle against the platform backends.
    ///
    /// Discovery is attempted immediately. A missing external window is not
    /// an error; it just leaves the reference empty until [`Self::connect`].
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        Self::with_backends(config, platform_discovery(), platform_transport())
    }

    /// Create a handle with injected discovery and transport backends.
    pub fn with_backends(
        config: BridgeConfig,
        discovery: Box<dyn TargetDiscovery>,
        transport: Box<dyn MessageTransport>,
    ) -> Self {
        let mut bridge = Self {
            config,
            discovery,
            transport,
            window: None,
            connected: false,
            tempo: DEFAULT_TEMPO,
            key: DEFAULT_KEY.to_string(),
        };
        bridge.refresh_window();
        bridge
    }

    fn refresh_window(&mut self) {
        self.window = self.discovery.find(&self.config.window_class);
        debug!(
            window_class = %self.config.window_class,
            found = self.window.is_some(),
            "external window discovery"
        );
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Re-resolve the external window if no reference is held, then set and
    /// return the connected flag.
    ///
    /// Idempotent: repeated calls yield the same result while the external
    /// process state is unchanged.
    pub fn connect(&mut self) -> bool {
        if self.window.is_none() {
            self.refresh_window();
        }
        self.connected = self.window.is_some();
        self.connected
    }

    /// Drop the connection gate.
    ///
    /// The cached window reference is kept, so a later [`Self::connect`]
    /// succeeds without re-discovery. No-op when already disconnected.
    pub fn disconnect(&mut self) {
        if self.connected {
            debug!("bridge disconnected");
        }
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Forward an opaque payload to the external window.
    ///
    /// Fails silently (returns `false`) when not connected. Otherwise exactly
    /// one fire-and-forget platform send carries the payload, and the return
    /// value is whatever the transport reported about delivery.
    pub fn send_raw(&self, tag: u32, payload: &[u8]) -> bool {
        if !self.connected {
            return false;
        }
        let Some(target) = self.window else {
            return false;
        };
        let message = DataMessage::new(tag, payload);
        match self.transport.deliver(target, &message) {
            Ok(delivered) => delivered,
            Err(err) => {
                warn!(%err, tag, len = payload.len(), "data message delivery failed");
                false
            }
        }
    }

    /// [`Self::send_raw`] with the configured default tag.
    pub fn send(&self, payload: &[u8]) -> bool {
        self.send_raw(self.config.default_tag, payload)
    }

    /// Last cached project tempo.
    ///
    /// There is no protocol for querying the external application, so this
    /// never reflects real external state; nothing updates the cache. Callers
    /// must not rely on it for correctness.
    pub fn tempo(&self) -> f32 {
        if !self.connected {
            return DEFAULT_TEMPO;
        }
        self.tempo
    }

    /// Last cached project key. Same caveat as [`Self::tempo`].
    pub fn key(&self) -> &str {
        if !self.connected {
            return DEFAULT_KEY;
        }
        &self.key
    }

    /// Ask the external application to load a sample.
    ///
    /// Placeholder: requires a connection but performs no action, since no
    /// message protocol for sample loading exists yet.
    pub fn load_sample(&self, path: impl AsRef<Path>) -> bool {
        if !self.connected {
            return false;
        }
        debug!(path = %path.as_ref().display(), "load_sample has no protocol; reporting success");
        true
    }

    /// Ask the external application to create a named channel. Placeholder,
    /// see [`Self::load_sample`].
    pub fn create_channel(&self, name: &str) -> bool {
        if !self.connected {
            return false;
        }
        debug!(name, "create_channel has no protocol; reporting success");
        true
    }

    /// Attach tempo/key metadata to a sample. Placeholder, see
    /// [`Self::load_sample`].
    pub fn set_sample_properties(&self, path: impl AsRef<Path>, tempo: f32, key: &str) -> bool {
        if !self.connected {
            return false;
        }
        debug!(
            path = %path.as_ref().display(),
            tempo,
            key,
            "set_sample_properties has no protocol; reporting success"
        );
        true
    }
}

impl Default for StudioBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StudioBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioBridge")
            .field("window", &self.window)
            .field("connected", &self.connected)
            .finish_non_exhaustive()
    }
}
