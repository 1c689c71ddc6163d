use serde::{Deserialize, Serialize};

/// Window class the external application registers for its main form.
pub const DEFAULT_WINDOW_CLASS: &str = "FL Studio";

/// Environment variable overriding the window class to discover.
pub const WINDOW_CLASS_ENV: &str = "FLBRIDGE_WINDOW_CLASS";

/// Connection settings for a bridge handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Exact window class to look up. Brittle by construction: any change to
    /// the class the external application registers breaks discovery.
    pub window_class: String,
    /// Tag stamped on messages sent through [`crate::StudioBridge::send`].
    pub default_tag: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            window_class: std::env::var(WINDOW_CLASS_ENV)
                .unwrap_or_else(|_| DEFAULT_WINDOW_CLASS.to_string()),
            default_tag: 0,
        }
    }
}
