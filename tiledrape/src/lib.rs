//! tiledrape - Terrain, imagery and vector features per map tile
//!
//! This library loads everything a 3D map renderer needs to drape imagery
//! and vector features over terrain, one XYZ Web Mercator tile at a time.
//! For each tile it concurrently fetches an elevation raster (meshed with
//! an error-bounded RTIN), a texture (high-resolution aerial imagery at
//! high zoom, a coarse satellite mosaic below) and a vector tile, and joins
//! them into a [`TilePayload`](assembler::TilePayload).

pub mod assembler;
pub mod config;
pub mod coord;
pub mod features;
pub mod fetch;
pub mod logging;
pub mod source;
pub mod terrain;
pub mod texture;

pub use assembler::{AssembleError, AssemblerConfig, TileDataAssembler, TilePayload, TileRequest};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
