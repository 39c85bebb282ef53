//! Tile texture decoding.
//!
//! Texture responses are JPEG or PNG images; they are decoded into RGBA8 so
//! a renderer can upload them without caring about the source format.

mod error;

pub use error::TextureError;

use image::RgbaImage;

/// A decoded texture image.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub image: RgbaImage,
}

impl Texture {
    /// Decodes an encoded image (format guessed from its content).
    pub fn decode(data: &[u8]) -> Result<Self, TextureError> {
        let image = image::load_from_memory(data)?.to_rgba8();
        let (width, height) = image.dimensions();

        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }

        Ok(Self {
            width,
            height,
            image,
        })
    }

    /// Raw RGBA8 pixel data, row-major from the top-left corner.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }
}
