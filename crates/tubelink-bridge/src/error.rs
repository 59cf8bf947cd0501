//! Error types for the bridge
use thiserror::Error;

/// Bridge errors
///
/// Only configuration-level failures surface to callers; script evaluation
/// failures of fire-and-forget commands are swallowed and show up at debug
/// level in the logs instead.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The embed-page config object could not be serialized. Indicates
    /// malformed caller-supplied embed parameters, not a runtime fault.
    #[error("embed page config serialization failed: {0}")]
    ConfigSerialization(#[from] serde_json::Error),

    /// The script host refused to load the embed page.
    #[error("embed page load failed: {0}")]
    PageLoad(String),
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
