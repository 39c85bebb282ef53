//! Terrain decoder trait and the default RTIN implementation.

use image::RgbImage;
use serde::Serialize;
use tracing::trace;

use super::elevation::ElevationDecoder;
use super::error::TerrainError;
use super::martini::Martini;
use super::mesh::TerrainMesh;
use crate::coord::ProjectedBounds;

/// Default maximum mesh error in meters.
pub const DEFAULT_MESH_MAX_ERROR: f64 = 10.0;

/// Parameters passed through to the terrain decoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TerrainOptions {
    /// Bounds the mesh is georeferenced into
    pub bounds: ProjectedBounds,
    pub elevation_decoder: ElevationDecoder,
    /// Maximum vertical error tolerated by mesh simplification
    pub mesh_max_error: f64,
}

/// Turns an encoded elevation raster into a terrain mesh.
///
/// Implementations must be thread-safe so one decoder can serve
/// concurrently assembled tiles.
pub trait TerrainDecoder: Send + Sync {
    fn decode(&self, data: &[u8], options: &TerrainOptions) -> Result<TerrainMesh, TerrainError>;
}

/// Decodes RGB elevation rasters and simplifies them with an RTIN.
#[derive(Debug, Clone, Copy, Default)]
pub struct MartiniDecoder;

impl MartiniDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl TerrainDecoder for MartiniDecoder {
    fn decode(&self, data: &[u8], options: &TerrainOptions) -> Result<TerrainMesh, TerrainError> {
        let image = image::load_from_memory(data)?.to_rgb8();
        let (width, height) = image.dimensions();

        if width != height {
            return Err(TerrainError::InvalidDimensions {
                width,
                height,
                reason: "elevation raster must be square".to_string(),
            });
        }

        let martini = Martini::new(width)?;
        let grid = height_grid(&image, &options.elevation_decoder);
        let tile = martini.create_tile(grid)?;
        let mesh = tile.mesh(options.mesh_max_error);

        trace!(
            size = width,
            vertices = mesh.vertices.len(),
            triangles = mesh.triangles.len(),
            max_error = options.mesh_max_error,
            "Terrain mesh simplified"
        );

        Ok(TerrainMesh::from_grid(
            mesh,
            tile.terrain(),
            width,
            &options.bounds,
        ))
    }
}

/// Decodes a `size x size` raster into a `(size + 1)^2` height grid.
///
/// The extra bottom row and right column repeat their neighbours.
fn height_grid(image: &RgbImage, decoder: &ElevationDecoder) -> Vec<f64> {
    let size = image.width() as usize;
    let grid_size = size + 1;
    let mut terrain = vec![0.0; grid_size * grid_size];

    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        terrain[y as usize * grid_size + x as usize] = decoder.decode(r, g, b);
    }

    // backfill bottom border
    let last_row = grid_size * (grid_size - 1);
    for x in 0..grid_size - 1 {
        terrain[last_row + x] = terrain[last_row + x - grid_size];
    }

    // backfill right border
    for y in 0..grid_size {
        let i = y * grid_size + grid_size - 1;
        terrain[i] = terrain[i - 1];
    }

    terrain
}
