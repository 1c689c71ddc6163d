use tracing::debug;

/// Opaque reference to the external application's top-level window.
///
/// Holds the raw platform handle value. The reference is a snapshot from the
/// last discovery attempt, not a live health check: the window can close at
/// any time without invalidating the value held here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowRef(u64);

impl WindowRef {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Capability to locate the external target by identifier.
///
/// The production implementation asks the operating system for a top-level
/// window registered under the given class name. Keeping this behind a trait
/// lets tests and offline tooling substitute a fake target instead of
/// depending on a real external application.
pub trait TargetDiscovery {
    /// Look up the external target. Absence is not an error.
    fn find(&self, window_class: &str) -> Option<WindowRef>;
}

/// Discovery that always resolves to a fixed reference.
///
/// Backs the CLI's offline mode and tests that need a reachable target
/// without a running external process.
#[derive(Debug, Clone, Copy)]
pub struct FixedDiscovery(pub WindowRef);

impl TargetDiscovery for FixedDiscovery {
    fn find(&self, _window_class: &str) -> Option<WindowRef> {
        Some(self.0)
    }
}

/// Fallback for platforms without a window-message backend.
#[derive(Debug, Default)]
pub struct UnsupportedDiscovery;

impl TargetDiscovery for UnsupportedDiscovery {
    fn find(&self, window_class: &str) -> Option<WindowRef> {
        debug!(window_class, "window discovery unavailable on this platform");
        None
    }
}
