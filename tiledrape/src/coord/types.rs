//! Coordinate types and errors

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Maximum latitude supported by Web Mercator projection.
pub const MAX_LAT: f64 = 85.05112878;

/// Minimum latitude supported by Web Mercator projection.
pub const MIN_LAT: f64 = -85.05112878;

/// Minimum longitude.
pub const MIN_LON: f64 = -180.0;

/// Maximum longitude.
pub const MAX_LON: f64 = 180.0;

/// Minimum zoom level.
pub const MIN_ZOOM: u8 = 0;

/// Maximum zoom level accepted for tile coordinates.
pub const MAX_ZOOM: u8 = 24;

/// Size of the Web Mercator world at zoom 0, in flat world units.
pub const WORLD_SIZE: f64 = 512.0;

/// Errors raised by coordinate validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("Invalid latitude: {0} (must be between -85.05112878 and 85.05112878)")]
    InvalidLatitude(f64),

    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),

    #[error("Invalid zoom level: {0} (must be between 0 and 24)")]
    InvalidZoom(u8),

    #[error("Tile {x}/{y} is outside the {limit}x{limit} grid at zoom {z}")]
    TileOutOfRange { x: u32, y: u32, z: u8, limit: u32 },

    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("Unknown tile space '{0}' (expected 'geographic' or 'local')")]
    UnknownTileSpace(String),
}

/// A tile in the XYZ Web Mercator pyramid.
///
/// `x` is the column (west to east), `y` the row (north to south) and `z`
/// the zoom level. Valid coordinates satisfy `x, y < 2^z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    /// Creates a validated tile coordinate.
    pub fn new(x: u32, y: u32, z: u8) -> Result<Self, CoordError> {
        if z > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(z));
        }
        let limit = tiles_per_side(z);
        if x >= limit || y >= limit {
            return Err(CoordError::TileOutOfRange { x, y, z, limit });
        }
        Ok(Self { x, y, z })
    }

    /// Geographic extent of this tile.
    pub fn bounding_box(&self) -> GeoBoundingBox {
        let n = tiles_per_side(self.z) as f64;
        GeoBoundingBox {
            west: self.x as f64 / n * 360.0 - 180.0,
            south: row_to_lat(self.y as f64 + 1.0, n),
            east: (self.x as f64 + 1.0) / n * 360.0 - 180.0,
            north: row_to_lat(self.y as f64, n),
        }
    }

    /// Transform from tile-local unit space into the 512-unit world.
    ///
    /// Tile-local `(0, 0)` is the north-west corner and `(1, 1)` the
    /// south-east corner; the y axis is flipped so world y grows northward.
    pub fn model_transform(&self) -> TileTransform {
        let world_scale = tiles_per_side(self.z) as f64;
        let x_scale = WORLD_SIZE / world_scale;
        let y_scale = -x_scale;

        let x_offset = WORLD_SIZE * self.x as f64 / world_scale;
        let y_offset = WORLD_SIZE * (1.0 - self.y as f64 / world_scale);

        TileTransform {
            translate: [x_offset, y_offset, 0.0],
            scale: [x_scale, y_scale, 1.0],
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Number of tiles along one side of the grid at `zoom`.
#[inline]
pub(crate) fn tiles_per_side(zoom: u8) -> u32 {
    1u32 << zoom
}

#[inline]
fn row_to_lat(row: f64, n: f64) -> f64 {
    let lat_rad = (PI * (1.0 - 2.0 * row / n)).sinh().atan();
    lat_rad * 180.0 / PI
}

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoBoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoBoundingBox {
    /// Creates a bounding box, rejecting inverted or out-of-range extents.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<Self, CoordError> {
        if !(MIN_LON..=MAX_LON).contains(&west) {
            return Err(CoordError::InvalidLongitude(west));
        }
        if !(MIN_LON..=MAX_LON).contains(&east) {
            return Err(CoordError::InvalidLongitude(east));
        }
        if !(-90.0..=90.0).contains(&south) {
            return Err(CoordError::InvalidLatitude(south));
        }
        if !(-90.0..=90.0).contains(&north) {
            return Err(CoordError::InvalidLatitude(north));
        }
        if west >= east || south >= north {
            return Err(CoordError::InvalidBoundingBox(format!(
                "west={} south={} east={} north={}",
                west, south, east, north
            )));
        }
        Ok(Self {
            west,
            south,
            east,
            north,
        })
    }

    /// Center point as `(longitude, latitude)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.west + self.east) / 2.0,
            (self.south + self.north) / 2.0,
        )
    }
}

/// Bounds in flat Web Mercator world coordinates.
///
/// `min_y` is the southern edge: world y grows northward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ProjectedBounds {
    /// Projects a geographic bounding box at the given zoom level.
    pub fn from_bbox(bbox: &GeoBoundingBox, zoom: u8) -> Self {
        let (min_x, min_y) = super::project_flat(bbox.west, bbox.south, zoom);
        let (max_x, max_y) = super::project_flat(bbox.east, bbox.north, zoom);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Unit bounds for meshes built in tile-local space.
    ///
    /// `min_y` is 1 and `max_y` 0 so the raster origin lands at the top-left.
    pub fn tile_local() -> Self {
        Self {
            min_x: 0.0,
            min_y: 1.0,
            max_x: 1.0,
            max_y: 0.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Bounds as `[min_x, min_y, max_x, max_y]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

/// Translate-then-scale transform applied to tile-local geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileTransform {
    pub translate: [f64; 3],
    pub scale: [f64; 3],
}

impl TileTransform {
    /// Maps a tile-local point into world space.
    pub fn apply(&self, point: [f64; 3]) -> [f64; 3] {
        [
            self.translate[0] + self.scale[0] * point[0],
            self.translate[1] + self.scale[1] * point[1],
            self.translate[2] + self.scale[2] * point[2],
        ]
    }

    /// Column-major 4x4 matrix equivalent of this transform.
    pub fn to_matrix(&self) -> [f64; 16] {
        let [sx, sy, sz] = self.scale;
        let [tx, ty, tz] = self.translate;
        [
            sx, 0.0, 0.0, 0.0, //
            0.0, sy, 0.0, 0.0, //
            0.0, 0.0, sz, 0.0, //
            tx, ty, tz, 1.0,
        ]
    }
}

/// Coordinate space tile contents are emitted in.
///
/// In `Geographic` space meshes are positioned by their projected bounds and
/// features carry WGS84 longitude/latitude. In `Local` space both use the
/// unit tile square with the origin at the north-west corner, and the
/// renderer positions the tile with [`TileCoord::model_transform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileSpace {
    #[default]
    Geographic,
    Local,
}

impl TileSpace {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileSpace::Geographic => "geographic",
            TileSpace::Local => "local",
        }
    }
}

impl fmt::Display for TileSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TileSpace {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "geographic" | "wgs84" => Ok(TileSpace::Geographic),
            "local" | "tile" => Ok(TileSpace::Local),
            other => Err(CoordError::UnknownTileSpace(other.to_string())),
        }
    }
}

/// Iterator over every tile in an inclusive column/row range.
///
/// Yields tiles in row-major order (north to south, then west to east).
#[derive(Debug, Clone)]
pub struct TileRangeIterator {
    pub(crate) z: u8,
    pub(crate) min_x: u32,
    pub(crate) max_x: u32,
    pub(crate) max_y: u32,
    pub(crate) next_x: u32,
    pub(crate) next_y: u32,
    pub(crate) done: bool,
}

impl Iterator for TileRangeIterator {
    type Item = TileCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let tile = TileCoord {
            x: self.next_x,
            y: self.next_y,
            z: self.z,
        };

        if self.next_x < self.max_x {
            self.next_x += 1;
        } else if self.next_y < self.max_y {
            self.next_x = self.min_x;
            self.next_y += 1;
        } else {
            self.done = true;
        }

        Some(tile)
    }
}
