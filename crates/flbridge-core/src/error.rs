use thiserror::Error;

/// Errors raised by the platform and transport layer.
///
/// The bridge handle keeps the boolean success/failure contract of the
/// original boundary; these variants exist for backends and for tooling that
/// wants to report *why* an operation could not be attempted.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("window messaging is not supported on this platform")]
    PlatformUnsupported,
    #[error("no external window found for class {0:?}")]
    WindowNotFound(String),
    #[error("loopback transport receiver is gone")]
    TransportClosed,
}
