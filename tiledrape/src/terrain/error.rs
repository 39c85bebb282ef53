//! Error types for terrain decoding.

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors that can occur while loading a terrain mesh.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// Elevation raster could not be fetched
    #[error("Terrain fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Elevation raster could not be decoded as an image
    #[error("Failed to decode elevation image: {0}")]
    Image(#[from] image::ImageError),

    /// Raster dimensions cannot be meshed
    #[error("Invalid elevation raster {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: String,
    },

    /// Failed to write mesh output
    #[error("Failed to write mesh: {0}")]
    Io(#[from] std::io::Error),
}
