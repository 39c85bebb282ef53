//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude),
//! Web Mercator tile coordinates and the flat projected world space used to
//! georeference terrain meshes.

mod types;

pub use types::{
    CoordError, GeoBoundingBox, ProjectedBounds, TileCoord, TileRangeIterator, TileSpace,
    TileTransform, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM, WORLD_SIZE,
};

use std::f64::consts::PI;

use types::tiles_per_side;

/// Projects a longitude/latitude pair into flat Web Mercator world space.
///
/// The world is `512 * 2^zoom` units wide. X grows eastward from the
/// antimeridian and Y grows northward from the southern projection limit.
/// Latitudes beyond the projection limit are clamped.
#[inline]
pub fn project_flat(lon: f64, lat: f64, zoom: u8) -> (f64, f64) {
    let scale = WORLD_SIZE * 2.0_f64.powi(zoom as i32);
    let lat = lat.clamp(MIN_LAT, MAX_LAT);

    let lambda = lon.to_radians();
    let phi = lat.to_radians();

    let x = scale * (lambda + PI) / (2.0 * PI);
    let y = scale * (PI + (PI / 4.0 + phi * 0.5).tan().ln()) / (2.0 * PI);

    (x, y)
}

/// Converts geographic coordinates to the tile containing them.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 24)
#[inline]
pub fn tile_for_lat_lon(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    Ok(TileCoord {
        x: lon_to_col(lon, zoom),
        y: lat_to_row(lat, zoom),
        z: zoom,
    })
}

/// Enumerates the tiles at `zoom` that intersect `bbox`.
///
/// This is the visible-tile set a tiling framework would hand to the
/// assembler for a viewport with that extent.
pub fn tiles_covering(bbox: &GeoBoundingBox, zoom: u8) -> Result<TileRangeIterator, CoordError> {
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let min_x = lon_to_col(bbox.west, zoom);
    let max_x = lon_to_col(bbox.east, zoom);
    // Rows grow southward, so the north edge gives the smallest row.
    let min_y = lat_to_row(bbox.north.clamp(MIN_LAT, MAX_LAT), zoom);
    let max_y = lat_to_row(bbox.south.clamp(MIN_LAT, MAX_LAT), zoom);

    Ok(TileRangeIterator {
        z: zoom,
        min_x,
        max_x,
        max_y,
        next_x: min_x,
        next_y: min_y,
        done: false,
    })
}

#[inline]
fn lon_to_col(lon: f64, zoom: u8) -> u32 {
    let n = tiles_per_side(zoom);
    let col = ((lon + 180.0) / 360.0 * n as f64).floor();
    (col.max(0.0) as u32).min(n - 1)
}

#[inline]
fn lat_to_row(lat: f64, zoom: u8) -> u32 {
    let n = tiles_per_side(zoom);
    let lat_rad = lat.to_radians();
    let row = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n as f64).floor();
    (row.max(0.0) as u32).min(n - 1)
}
