//! Default values for all configuration settings.

use super::settings::*;
use crate::coord::TileSpace;
use crate::fetch::DEFAULT_TIMEOUT_SECS;
use crate::source::DEFAULT_TEXTURE_ZOOM_THRESHOLD;
use crate::terrain::DEFAULT_MESH_MAX_ERROR;

/// AWS open elevation tiles, Terrarium encoding.
pub const DEFAULT_TERRAIN_URL: &str =
    "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png";

/// USGS aerial imagery, used at high zoom.
pub const DEFAULT_TEXTURE_HIGH_RES_URL: &str =
    "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/tile/{z}/{y}/{x}";

/// EOX Sentinel-2 cloudless mosaic, used at low zoom.
pub const DEFAULT_TEXTURE_COARSE_URL: &str =
    "https://tiles.maps.eox.at/wmts/1.0.0/s2cloudless-2020_3857/default/g/{z}/{y}/{x}.jpg";

/// OpenMapTiles vector tiles.
pub const DEFAULT_FEATURES_URL: &str =
    "https://mbtiles.nst.guide/services/openmaptiles/own/tiles/{z}/{x}/{y}.pbf";

pub const DEFAULT_LOG_LEVEL: &str = "info";

impl Default for SourcesSettings {
    fn default() -> Self {
        Self {
            terrain: DEFAULT_TERRAIN_URL.to_string(),
            texture_high_res: DEFAULT_TEXTURE_HIGH_RES_URL.to_string(),
            texture_coarse: DEFAULT_TEXTURE_COARSE_URL.to_string(),
            texture_zoom_threshold: DEFAULT_TEXTURE_ZOOM_THRESHOLD,
            features: DEFAULT_FEATURES_URL.to_string(),
        }
    }
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            encoding: ElevationEncoding::Terrarium,
            mesh_max_error: DEFAULT_MESH_MAX_ERROR,
        }
    }
}

impl Default for AssemblerSettings {
    fn default() -> Self {
        Self {
            tile_space: TileSpace::Geographic,
            guard_terrain: false,
            guard_features: true,
        }
    }
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
