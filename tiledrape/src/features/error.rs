//! Error types for vector feature decoding.

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors that can occur while loading vector features.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Vector tile could not be fetched
    #[error("Feature fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Gzip-compressed tile could not be inflated
    #[error("Failed to decompress vector tile: {0}")]
    Decompress(#[source] std::io::Error),

    /// Payload is not a valid vector tile protobuf
    #[error("Failed to decode vector tile: {0}")]
    Protobuf(String),

    /// A feature's geometry command stream is malformed
    #[error("Invalid geometry in layer '{layer}': {reason}")]
    Geometry { layer: String, reason: String },

    /// A feature references a missing key or value
    #[error("Invalid tags in layer '{layer}': {reason}")]
    Tags { layer: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FeatureError::Geometry {
            layer: "water".to_string(),
            reason: "unknown command 5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid geometry in layer 'water': unknown command 5"
        );
    }

    #[test]
    fn test_from_fetch_error() {
        let err: FeatureError = FetchError::Client("tls".to_string()).into();
        assert!(matches!(err, FeatureError::Fetch(_)));
    }
}
