//! Tile data assembly
//!
//! The [`TileDataAssembler`] is the single entry point a tiling framework
//! calls per visible tile. For each [`TileRequest`] it resolves the source
//! URLs, projects the tile bounds and loads the three parts concurrently:
//!
//! - terrain: elevation raster fetched and meshed within the projected bounds
//! - texture: high-resolution imagery at `z >= 12`, a coarse mosaic below
//! - features: vector tile decoded into a feature collection
//!
//! The joined result is a [`TilePayload`].

mod tile_assembler;
mod types;

pub use tile_assembler::TileDataAssembler;
pub use types::{AssembleError, AssemblerConfig, TilePayload, TileRequest};
