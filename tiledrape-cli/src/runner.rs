//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and assembler
//! creation to reduce duplication across command handlers.

use std::path::{Path, PathBuf};

use tiledrape::config::{config_file_path, ConfigFile};
use tiledrape::fetch::AsyncReqwestClient;
use tiledrape::logging::{init_logging, LoggingGuard};
use tiledrape::{AssemblerConfig, TileDataAssembler};
use tracing::info;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    _logging_guard: LoggingGuard,
    config: ConfigFile,
    config_path: PathBuf,
}

impl CliRunner {
    /// Load config (from `config_path` or the default location) and
    /// initialize logging.
    pub fn new(config_path: Option<&Path>) -> Result<Self, CliError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let logging_guard =
            init_logging(&config.logging).map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
            config_path,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("tiledrape v{}", tiledrape::VERSION);
        info!(
            config = %self.config_path.display(),
            "tiledrape CLI: {} command",
            command
        );
    }

    /// Assembler configuration from the config file.
    pub fn assembler_config(&self) -> Result<AssemblerConfig, CliError> {
        Ok(self.config.to_assembler_config()?)
    }

    /// Create an assembler backed by the production HTTP client.
    pub fn create_assembler(
        &self,
        config: AssemblerConfig,
    ) -> Result<TileDataAssembler<AsyncReqwestClient>, CliError> {
        let client =
            AsyncReqwestClient::with_timeout(self.config.download.timeout).map_err(CliError::Client)?;
        Ok(TileDataAssembler::new(client, config))
    }
}
