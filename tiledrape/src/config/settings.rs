//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::coord::TileSpace;
use crate::terrain::ElevationDecoder;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub sources: SourcesSettings,
    pub terrain: TerrainSettings,
    pub assembler: AssemblerSettings,
    pub download: DownloadSettings,
    pub logging: LoggingSettings,
}

/// URL templates. An empty template disables the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcesSettings {
    pub terrain: String,
    pub texture_high_res: String,
    pub texture_coarse: String,
    /// Zoom from which `texture_high_res` replaces `texture_coarse`
    pub texture_zoom_threshold: u8,
    pub features: String,
}

/// Terrain decoding settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSettings {
    pub encoding: ElevationEncoding,
    /// Maximum mesh error in meters
    pub mesh_max_error: f64,
}

/// RGB elevation encodings with a known decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationEncoding {
    Terrarium,
    Mapbox,
}

impl ElevationEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElevationEncoding::Terrarium => "terrarium",
            ElevationEncoding::Mapbox => "mapbox",
        }
    }

    pub fn decoder(&self) -> ElevationDecoder {
        match self {
            ElevationEncoding::Terrarium => ElevationDecoder::terrarium(),
            ElevationEncoding::Mapbox => ElevationDecoder::mapbox(),
        }
    }
}

impl fmt::Display for ElevationEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElevationEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "terrarium" => Ok(ElevationEncoding::Terrarium),
            "mapbox" | "terrain-rgb" => Ok(ElevationEncoding::Mapbox),
            other => Err(format!("unknown elevation encoding '{}'", other)),
        }
    }
}

/// Failure policy and output space.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerSettings {
    pub tile_space: TileSpace,
    pub guard_terrain: bool,
    pub guard_features: bool,
}

/// HTTP settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file; `None` logs to stderr only
    pub file: Option<PathBuf>,
    /// Default level filter, overridden by `RUST_LOG`
    pub level: String,
}
