//! Error types shared by the bridge, monitor and menu layers.

use thiserror::Error;

/// Failure of a device-bridge operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The host OS has no bundled bridge executable.
    #[error("unsupported platform '{0}'")]
    UnsupportedPlatform(String),
    /// The bridge tool itself could not run (missing binary, driver, daemon).
    #[error("bridge unavailable: {0}")]
    BridgeUnavailable(String),
    /// A single bridge sub-command failed.
    #[error("device not connected: {0}")]
    DeviceNotConnected(String),
}

/// A menu answer outside the accepted `1..=max` range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid choice. Please enter a number between 1 and {max}.")]
pub struct InvalidMenuChoice {
    pub input: String,
    pub max: usize,
}
