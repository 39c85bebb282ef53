//! Vector feature decoding
//!
//! Vector tiles are decoded into a GeoJSON-shaped [`FeatureCollection`].
//! Coordinates are emitted either as WGS84 longitude/latitude or in unit
//! tile-local space, depending on the requested [`TileSpace`].

mod error;
mod geojson;
mod mvt;

pub use error::FeatureError;
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use mvt::{MvtDecoder, DEFAULT_EXTENT};

#[cfg(test)]
pub(crate) use mvt::tests as mvt_fixtures;

use crate::coord::{TileCoord, TileSpace};

/// Turns an encoded vector tile into features.
///
/// Implementations must be thread-safe so one decoder can serve
/// concurrently assembled tiles.
pub trait FeatureDecoder: Send + Sync {
    /// Decodes `data`, the vector tile fetched for `tile`.
    fn decode(
        &self,
        data: &[u8],
        tile: &TileCoord,
        space: TileSpace,
    ) -> Result<FeatureCollection, FeatureError>;
}
