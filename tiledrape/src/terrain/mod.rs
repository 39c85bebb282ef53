//! Terrain mesh decoding
//!
//! Elevation rasters encode heights in their RGB channels. A
//! [`TerrainDecoder`] turns such a raster into a georeferenced
//! [`TerrainMesh`]; the default [`MartiniDecoder`] simplifies the height grid
//! with a right-triangulated irregular network so every triangle stays within
//! the configured error tolerance.
//!
//! # Example
//!
//! ```
//! use tiledrape::coord::ProjectedBounds;
//! use tiledrape::terrain::{ElevationDecoder, TerrainOptions, DEFAULT_MESH_MAX_ERROR};
//!
//! let options = TerrainOptions {
//!     bounds: ProjectedBounds::tile_local(),
//!     elevation_decoder: ElevationDecoder::terrarium(),
//!     mesh_max_error: DEFAULT_MESH_MAX_ERROR,
//! };
//! assert_eq!(options.elevation_decoder.decode(128, 0, 0), 0.0);
//! ```

mod decoder;
mod elevation;
mod error;
mod martini;
mod mesh;

pub use decoder::{MartiniDecoder, TerrainDecoder, TerrainOptions, DEFAULT_MESH_MAX_ERROR};
pub use elevation::ElevationDecoder;
pub use error::TerrainError;
pub use martini::{GridMesh, Martini, MartiniTile, MAX_TILE_SIZE};
pub use mesh::TerrainMesh;

#[cfg(test)]
pub(crate) use decoder::tests::terrarium_png;
