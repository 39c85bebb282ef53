//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use tiledrape::assembler::AssembleError;
use tiledrape::config::ConfigFileError;
use tiledrape::coord::CoordError;
use tiledrape::fetch::FetchError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(ConfigFileError),
    /// Invalid tile or coordinate arguments
    InvalidArgs(String),
    /// Failed to create the HTTP client
    Client(FetchError),
    /// Failed to assemble the tile
    Assemble(AssembleError),
    /// Failed to write output file
    FileWrite { path: String, error: String },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Config(ConfigFileError::InvalidValue { .. }) = self {
            eprintln!();
            eprintln!("Fix the value in the config file or regenerate it with: tiledrape init --force");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidArgs(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::Client(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Assemble(e) => write!(f, "Failed to assemble tile: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Client(e) => Some(e),
            CliError::Assemble(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::InvalidArgs(e.to_string())
    }
}

impl From<AssembleError> for CliError {
    fn from(e: AssembleError) -> Self {
        CliError::Assemble(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_file_write() {
        let err = CliError::FileWrite {
            path: "out.obj".to_string(),
            error: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to write file 'out.obj': permission denied");
    }

    #[test]
    fn test_from_coord_error() {
        let err: CliError = CoordError::InvalidZoom(30).into();
        assert!(matches!(err, CliError::InvalidArgs(_)));
        assert!(err.to_string().contains("30"));
    }
}
