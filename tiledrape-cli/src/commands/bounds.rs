//! Bounds command - print the geographic and projected extent of a tile.

use serde_json::json;
use tiledrape::coord::ProjectedBounds;

use super::common::TileSelection;
use crate::error::CliError;

/// Run the bounds command.
pub fn run(selection: &TileSelection, as_json: bool) -> Result<(), CliError> {
    let tile = selection.resolve()?;
    let bbox = tile.bounding_box();
    let projected = ProjectedBounds::from_bbox(&bbox, tile.z);
    let transform = tile.model_transform();

    if as_json {
        let document = json!({
            "tile": tile,
            "bbox": bbox,
            "projected": projected,
            "model_matrix": transform.to_matrix().to_vec(),
        });
        let text = serde_json::to_string_pretty(&document)
            .map_err(|e| CliError::InvalidArgs(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    println!("Tile {}", tile);
    println!(
        "  bbox:      west {:.6}, south {:.6}, east {:.6}, north {:.6}",
        bbox.west, bbox.south, bbox.east, bbox.north
    );
    println!(
        "  projected: [{:.4}, {:.4}, {:.4}, {:.4}]",
        projected.min_x, projected.min_y, projected.max_x, projected.max_y
    );
    println!(
        "  transform: translate {:?}, scale {:?}",
        transform.translate, transform.scale
    );
    Ok(())
}
