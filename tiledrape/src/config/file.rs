//! Reading and writing `~/.tiledrape/config.ini`.
//!
//! A missing file is not an error: every setting has a default.

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;
use crate::assembler::AssemblerConfig;
use crate::source::{TextureSources, TileSources, TileUrlTemplate};

/// Errors from loading, validating or saving the config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but is not readable INI
    #[error("Cannot read config: {0}")]
    ReadError(#[from] ini::Error),

    #[error("Cannot write config: {0}")]
    WriteError(String),

    /// A key holds a value that does not parse or validate
    #[error("Bad config value {section}.{key} = '{value}': {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    #[error("Cannot create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Reads [`config_file_path`].
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Reads `path`, or returns the defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Writes [`config_file_path`].
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Writes the commented INI form to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Builds the assembler configuration described by this file.
    pub fn to_assembler_config(&self) -> Result<AssemblerConfig, ConfigFileError> {
        let sources = TileSources {
            terrain: template("terrain", &self.sources.terrain)?,
            texture: TextureSources::new(
                template("texture_high_res", &self.sources.texture_high_res)?,
                template("texture_coarse", &self.sources.texture_coarse)?,
            )
            .with_threshold(self.sources.texture_zoom_threshold),
            features: template("features", &self.sources.features)?,
        };

        Ok(AssemblerConfig::new(sources)
            .with_elevation_decoder(self.terrain.encoding.decoder())
            .with_mesh_max_error(self.terrain.mesh_max_error)
            .with_tile_space(self.assembler.tile_space)
            .with_guard_terrain(self.assembler.guard_terrain)
            .with_guard_features(self.assembler.guard_features))
    }
}

fn template(key: &str, value: &str) -> Result<Option<TileUrlTemplate>, ConfigFileError> {
    TileUrlTemplate::parse_optional(value).map_err(|e| ConfigFileError::InvalidValue {
        section: "sources".to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// `~/.tiledrape`, or `./.tiledrape` without a home directory.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tiledrape")
}

/// `config.ini` inside [`config_directory`].
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
