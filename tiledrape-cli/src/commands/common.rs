//! Common types and utilities shared across CLI commands.

use tiledrape::coord::{tile_for_lat_lon, TileCoord};

use crate::error::CliError;

/// Parse a `z/x/y` tile reference, as used by `--tile`.
pub fn parse_tile(s: &str) -> Result<TileCoord, String> {
    let parts: Vec<&str> = s.trim().split('/').collect();
    if parts.len() != 3 {
        return Err(format!("expected z/x/y, got '{}'", s));
    }

    let z = parts[0]
        .parse::<u8>()
        .map_err(|_| format!("invalid zoom '{}'", parts[0]))?;
    let x = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid column '{}'", parts[1]))?;
    let y = parts[2]
        .parse::<u32>()
        .map_err(|_| format!("invalid row '{}'", parts[2]))?;

    TileCoord::new(x, y, z).map_err(|e| e.to_string())
}

/// Tile selection shared by commands that act on one tile.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TileSelection {
    /// Tile as z/x/y
    #[arg(long, value_parser = parse_tile, conflicts_with_all = ["lat", "lon"])]
    pub tile: Option<TileCoord>,

    /// Latitude in decimal degrees (with --lon and --zoom)
    #[arg(long, requires_all = ["lon", "zoom"], allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees (with --lat and --zoom)
    #[arg(long, requires_all = ["lat", "zoom"], allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Zoom level (with --lat and --lon)
    #[arg(long)]
    pub zoom: Option<u8>,
}

impl TileSelection {
    /// Resolve the selected tile: an explicit tile wins, then lat/lon/zoom.
    pub fn resolve(&self) -> Result<TileCoord, CliError> {
        if let Some(tile) = self.tile {
            return Ok(tile);
        }

        match (self.lat, self.lon, self.zoom) {
            (Some(lat), Some(lon), Some(zoom)) => Ok(tile_for_lat_lon(lat, lon, zoom)?),
            _ => Err(CliError::InvalidArgs(
                "select a tile with --tile z/x/y or --lat, --lon and --zoom".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_tile() {
        assert_eq!(parse_tile("11/328/726").unwrap(), TileCoord { x: 328, y: 726, z: 11 });
        assert_eq!(parse_tile(" 0/0/0 ").unwrap(), TileCoord { x: 0, y: 0, z: 0 });
    }

    #[test]
    fn test_parse_tile_errors() {
        assert!(parse_tile("11/328").is_err());
        assert!(parse_tile("a/1/1").is_err());
        assert!(parse_tile("1/2/0").unwrap_err().contains("outside"));
        assert!(parse_tile("25/0/0").is_err());
    }

    #[test]
    fn test_resolve_prefers_tile() {
        let selection = TileSelection {
            tile: Some(TileCoord { x: 1, y: 1, z: 1 }),
            ..Default::default()
        };
        assert_eq!(selection.resolve().unwrap(), TileCoord { x: 1, y: 1, z: 1 });
    }

    #[test]
    fn test_resolve_lat_lon() {
        let selection = TileSelection {
            tile: None,
            lat: Some(46.2),
            lon: Some(-122.19),
            zoom: Some(11),
        };
        assert_eq!(selection.resolve().unwrap(), TileCoord { x: 328, y: 726, z: 11 });
    }

    #[test]
    fn test_resolve_requires_selection() {
        assert!(matches!(
            TileSelection::default().resolve(),
            Err(CliError::InvalidArgs(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_display_parses_back(z in 0u8..=20, fx in 0.0f64..1.0, fy in 0.0f64..1.0) {
            let n = 1u32 << z;
            let tile = TileCoord::new((fx * n as f64) as u32, (fy * n as f64) as u32, z)?;
            prop_assert_eq!(parse_tile(&tile.to_string()).unwrap(), tile);
        }
    }
}
