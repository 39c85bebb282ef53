//! User configuration
//!
//! Settings live in an INI file at `~/.tiledrape/config.ini`. A missing
//! file yields defaults; every key is optional and overlays the default.
//! [`ConfigFile::to_assembler_config`] turns the file into an
//! [`AssemblerConfig`](crate::assembler::AssemblerConfig).

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_FEATURES_URL, DEFAULT_LOG_LEVEL, DEFAULT_TERRAIN_URL, DEFAULT_TEXTURE_COARSE_URL,
    DEFAULT_TEXTURE_HIGH_RES_URL,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    AssemblerSettings, ConfigFile, DownloadSettings, ElevationEncoding, LoggingSettings,
    SourcesSettings, TerrainSettings,
};
