//! tiledrape CLI - Command-line interface
//!
//! This binary provides a command-line interface to the tiledrape library.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::TileSelection;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "tiledrape")]
#[command(version, about = "Assemble terrain, imagery and vector features per map tile", long_about = None)]
struct Cli {
    /// Config file (default: ~/.tiledrape/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and assemble one tile
    Fetch {
        #[command(flatten)]
        selection: TileSelection,

        /// Write vector features as GeoJSON
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Write the terrain mesh as Wavefront OBJ
        #[arg(long)]
        obj: Option<PathBuf>,

        /// Write the texture image (format from extension)
        #[arg(long)]
        texture: Option<PathBuf>,

        /// Maximum mesh error in meters (overrides config)
        #[arg(long)]
        max_error: Option<f64>,

        /// Emit mesh and features in tile-local unit space
        #[arg(long)]
        local: bool,

        /// Assemble the tile without a mesh if terrain fails
        #[arg(long)]
        guard_terrain: bool,
    },

    /// Print the source URLs resolved for a tile
    Urls {
        #[command(flatten)]
        selection: TileSelection,
    },

    /// Print the geographic and projected bounds of a tile
    Bounds {
        #[command(flatten)]
        selection: TileSelection,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the tiles covering a bounding box
    Tiles {
        #[arg(long, allow_negative_numbers = true)]
        west: f64,
        #[arg(long, allow_negative_numbers = true)]
        south: f64,
        #[arg(long, allow_negative_numbers = true)]
        east: f64,
        #[arg(long, allow_negative_numbers = true)]
        north: f64,
        #[arg(long)]
        zoom: u8,

        /// Maximum number of tiles to print
        #[arg(long, default_value = "1000")]
        limit: usize,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Fetch {
            selection,
            geojson,
            obj,
            texture,
            max_error,
            local,
            guard_terrain,
        } => {
            let runner = CliRunner::new(config_path)?;
            commands::fetch::run(
                &runner,
                commands::fetch::FetchArgs {
                    selection,
                    geojson,
                    obj,
                    texture,
                    max_error,
                    local,
                    guard_terrain,
                },
            )
        }
        Commands::Urls { selection } => {
            let runner = CliRunner::new(config_path)?;
            commands::urls::run(&runner, &selection)
        }
        Commands::Bounds { selection, json } => commands::bounds::run(&selection, json),
        Commands::Tiles {
            west,
            south,
            east,
            north,
            zoom,
            limit,
        } => commands::tiles::run(commands::tiles::TilesArgs {
            west,
            south,
            east,
            north,
            zoom,
            limit,
        }),
        Commands::Init { force } => commands::init::run(config_path, force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch_with_tile() {
        let cli = Cli::try_parse_from([
            "tiledrape",
            "fetch",
            "--tile",
            "10/3/5",
            "--max-error",
            "2.5",
            "--local",
        ])
        .unwrap();

        match cli.command {
            Commands::Fetch {
                selection,
                max_error,
                local,
                ..
            } => {
                assert_eq!(selection.resolve().unwrap().to_string(), "10/3/5");
                assert_eq!(max_error, Some(2.5));
                assert!(local);
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_parse_fetch_with_lat_lon() {
        let cli = Cli::try_parse_from([
            "tiledrape", "fetch", "--lat", "46.2", "--lon", "-122.19", "--zoom", "11",
        ])
        .unwrap();

        match cli.command {
            Commands::Fetch { selection, .. } => {
                assert_eq!(selection.resolve().unwrap().to_string(), "11/328/726");
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_lat_requires_lon_and_zoom() {
        assert!(Cli::try_parse_from(["tiledrape", "urls", "--lat", "46.2"]).is_err());
    }

    #[test]
    fn test_tile_conflicts_with_lat_lon() {
        assert!(Cli::try_parse_from([
            "tiledrape", "bounds", "--tile", "1/0/0", "--lat", "1", "--lon", "1", "--zoom", "1",
        ])
        .is_err());
    }

    #[test]
    fn test_invalid_tile_rejected_at_parse() {
        assert!(Cli::try_parse_from(["tiledrape", "bounds", "--tile", "2/9/0"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["tiledrape", "init", "--config", "/tmp/x.ini", "--force"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.ini")));
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}
