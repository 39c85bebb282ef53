//! Fetch error types

use thiserror::Error;

/// Errors that can occur while fetching a tile resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// Request could not be sent or no response arrived
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Response body could not be read
    #[error("Failed to read response from {url}: {reason}")]
    Body { url: String, reason: String },
}

impl FetchError {
    /// True when the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}
