//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`bounds`] - Geographic and projected extent of a tile
//! - [`fetch`] - Assemble a single tile
//! - [`init`] - Configuration initialization
//! - [`tiles`] - Tiles covering a bounding box
//! - [`urls`] - Source URLs resolved for a tile

pub mod bounds;
pub mod common;
pub mod fetch;
pub mod init;
pub mod tiles;
pub mod urls;
