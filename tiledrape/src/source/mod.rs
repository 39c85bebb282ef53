//! Tile sources and URL resolution
//!
//! A tile is assembled from up to three sources: a terrain elevation raster,
//! a texture image and a vector-feature tile. Each source is described by a
//! [`TileUrlTemplate`]; any of them may be absent.
//!
//! Texture selection depends on zoom: at or above the threshold the
//! high-resolution aerial source is used, below it the coarse satellite
//! mosaic.

mod template;

pub use template::{TemplateError, TileUrlTemplate};

use crate::coord::TileCoord;

/// Zoom level from which the high-resolution texture source is used.
pub const DEFAULT_TEXTURE_ZOOM_THRESHOLD: u8 = 12;

/// Zoom-dependent pair of texture sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSources {
    /// Aerial imagery used at `zoom >= threshold`
    pub high_res: Option<TileUrlTemplate>,
    /// Satellite mosaic used at `zoom < threshold`
    pub coarse: Option<TileUrlTemplate>,
    pub threshold: u8,
}

impl TextureSources {
    pub fn new(high_res: Option<TileUrlTemplate>, coarse: Option<TileUrlTemplate>) -> Self {
        Self {
            high_res,
            coarse,
            threshold: DEFAULT_TEXTURE_ZOOM_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Picks the template for a zoom level.
    pub fn select(&self, zoom: u8) -> Option<&TileUrlTemplate> {
        if zoom >= self.threshold {
            self.high_res.as_ref()
        } else {
            self.coarse.as_ref()
        }
    }
}

/// The configured set of per-tile sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSources {
    pub terrain: Option<TileUrlTemplate>,
    pub texture: TextureSources,
    pub features: Option<TileUrlTemplate>,
}

impl TileSources {
    /// Resolves concrete URLs for one tile.
    pub fn resolve(&self, tile: &TileCoord) -> TileUrls {
        TileUrls {
            terrain: self.terrain.as_ref().map(|t| t.expand(tile)),
            texture: self.texture.select(tile.z).map(|t| t.expand(tile)),
            features: self.features.as_ref().map(|t| t.expand(tile)),
        }
    }
}

/// Concrete URLs for one tile. `None` means the source is not configured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileUrls {
    pub terrain: Option<String>,
    pub texture: Option<String>,
    pub features: Option<String>,
}
