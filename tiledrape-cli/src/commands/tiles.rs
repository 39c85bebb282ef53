//! Tiles command - list the tiles covering a bounding box.

use tiledrape::coord::{tiles_covering, GeoBoundingBox};

use crate::error::CliError;

/// Arguments for the tiles command.
pub struct TilesArgs {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
    pub zoom: u8,
    pub limit: usize,
}

/// Run the tiles command.
pub fn run(args: TilesArgs) -> Result<(), CliError> {
    let bbox = GeoBoundingBox::new(args.west, args.south, args.east, args.north)?;

    let mut count = 0usize;
    for tile in tiles_covering(&bbox, args.zoom)? {
        if count == args.limit {
            println!("... (stopped after {} tiles, raise --limit for more)", args.limit);
            return Ok(());
        }
        println!("{}", tile);
        count += 1;
    }

    eprintln!("{} tiles at zoom {}", count, args.zoom);
    Ok(())
}
