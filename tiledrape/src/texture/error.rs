//! Error types for texture decoding.

use std::fmt;

use crate::fetch::FetchError;

/// Errors that can occur while loading a tile texture.
#[derive(Debug)]
pub enum TextureError {
    /// Texture image could not be fetched.
    Fetch(FetchError),
    /// Response body is not a decodable image.
    Decode(image::ImageError),
    /// Image decoded to zero width or height.
    Empty { width: u32, height: u32 },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Fetch(err) => write!(f, "Texture fetch failed: {}", err),
            TextureError::Decode(err) => write!(f, "Failed to decode texture: {}", err),
            TextureError::Empty { width, height } => {
                write!(f, "Texture has no pixels ({}×{})", width, height)
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Fetch(err) => Some(err),
            TextureError::Decode(err) => Some(err),
            TextureError::Empty { .. } => None,
        }
    }
}

impl From<FetchError> for TextureError {
    fn from(err: FetchError) -> Self {
        TextureError::Fetch(err)
    }
}

impl From<image::ImageError> for TextureError {
    fn from(err: image::ImageError) -> Self {
        TextureError::Decode(err)
    }
}
