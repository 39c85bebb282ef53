//! Init command - initialize configuration file.

use std::path::Path;

use tiledrape::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
///
/// Writes the default configuration unless a file already exists and
/// `force` is not set.
pub fn run(config_path: Option<&Path>, force: bool) -> Result<(), CliError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);

    if path.exists() && !force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    ConfigFile::default().save_to(&path)?;

    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to choose tile sources and decoding settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        run(Some(&path), false).unwrap();

        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[download]\ntimeout = 3\n").unwrap();

        run(Some(&path), false).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap().download.timeout, 3);

        run(Some(&path), true).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }
}
