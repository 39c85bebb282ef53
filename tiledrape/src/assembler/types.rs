//! Assembler request, payload, configuration and error types

use thiserror::Error;

use crate::coord::{GeoBoundingBox, ProjectedBounds, TileCoord, TileSpace};
use crate::features::{FeatureCollection, FeatureError};
use crate::source::TileSources;
use crate::terrain::{ElevationDecoder, TerrainError, TerrainMesh, DEFAULT_MESH_MAX_ERROR};
use crate::texture::Texture;

/// Errors that abort the assembly of a tile.
///
/// Texture failures never appear here; they degrade to a missing texture.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("Terrain unavailable for tile {tile}: {source}")]
    Terrain {
        tile: TileCoord,
        #[source]
        source: TerrainError,
    },

    #[error("Features unavailable for tile {tile}: {source}")]
    Features {
        tile: TileCoord,
        #[source]
        source: FeatureError,
    },
}

/// A tile the tiling framework wants loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRequest {
    pub coord: TileCoord,
    pub bbox: GeoBoundingBox,
}

impl TileRequest {
    pub fn new(coord: TileCoord, bbox: GeoBoundingBox) -> Self {
        Self { coord, bbox }
    }

    /// Request covering exactly the tile's own extent.
    pub fn from_coord(coord: TileCoord) -> Self {
        Self {
            coord,
            bbox: coord.bounding_box(),
        }
    }
}

impl From<TileCoord> for TileRequest {
    fn from(coord: TileCoord) -> Self {
        Self::from_coord(coord)
    }
}

/// Everything a renderer needs for one tile.
///
/// Each part is independently optional: a part is `None` when its source is
/// not configured or when its failure was tolerated.
#[derive(Debug, Clone)]
pub struct TilePayload {
    pub coord: TileCoord,
    /// Projected bounds of the requested bounding box at the tile's zoom
    pub bounds: ProjectedBounds,
    /// Coordinate space of the mesh and features
    pub space: TileSpace,
    pub terrain: Option<TerrainMesh>,
    pub texture: Option<Texture>,
    pub features: Option<FeatureCollection>,
}

impl TilePayload {
    /// True when no part of the tile could be loaded.
    pub fn is_empty(&self) -> bool {
        self.terrain.is_none() && self.texture.is_none() && self.features.is_none()
    }
}

/// Assembler settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerConfig {
    pub sources: TileSources,
    pub elevation_decoder: ElevationDecoder,
    /// Maximum mesh error in meters
    pub mesh_max_error: f64,
    pub tile_space: TileSpace,
    /// Assemble the tile without a mesh when terrain fails
    pub guard_terrain: bool,
    /// Assemble the tile without features when they fail
    pub guard_features: bool,
}

impl AssemblerConfig {
    /// Creates a configuration with default decoding settings.
    pub fn new(sources: TileSources) -> Self {
        Self {
            sources,
            elevation_decoder: ElevationDecoder::default(),
            mesh_max_error: DEFAULT_MESH_MAX_ERROR,
            tile_space: TileSpace::default(),
            guard_terrain: false,
            guard_features: true,
        }
    }

    pub fn with_elevation_decoder(mut self, decoder: ElevationDecoder) -> Self {
        self.elevation_decoder = decoder;
        self
    }

    pub fn with_mesh_max_error(mut self, max_error: f64) -> Self {
        self.mesh_max_error = max_error;
        self
    }

    pub fn with_tile_space(mut self, space: TileSpace) -> Self {
        self.tile_space = space;
        self
    }

    pub fn with_guard_terrain(mut self, guard: bool) -> Self {
        self.guard_terrain = guard;
        self
    }

    pub fn with_guard_features(mut self, guard: bool) -> Self {
        self.guard_features = guard;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TextureSources;

    #[test]
    fn test_request_from_coord_uses_tile_extent() {
        let coord = TileCoord::new(0, 0, 0).unwrap();
        let request = TileRequest::from(coord);

        assert_eq!(request.bbox.west, -180.0);
        assert_eq!(request.bbox.east, 180.0);
        assert!((request.bbox.north - 85.0511287798).abs() < 1e-9);
    }

    #[test]
    fn test_config_defaults() {
        let config = AssemblerConfig::new(TileSources {
            terrain: None,
            texture: TextureSources::new(None, None),
            features: None,
        });

        assert!(!config.guard_terrain);
        assert!(config.guard_features);
        assert_eq!(config.mesh_max_error, DEFAULT_MESH_MAX_ERROR);
        assert_eq!(config.tile_space, TileSpace::Geographic);
        assert_eq!(config.elevation_decoder, ElevationDecoder::terrarium());
    }

    #[test]
    fn test_error_display_names_tile() {
        let err = AssembleError::Terrain {
            tile: TileCoord { x: 3, y: 5, z: 10 },
            source: TerrainError::InvalidDimensions {
                width: 3,
                height: 3,
                reason: "tile size must be a power of two of at least 2".to_string(),
            },
        };
        assert!(err.to_string().starts_with("Terrain unavailable for tile 10/3/5:"));
    }
}
