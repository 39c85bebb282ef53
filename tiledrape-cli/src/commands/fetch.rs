//! Fetch command - assemble a single tile and report what was loaded.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use tiledrape::coord::TileSpace;
use tiledrape::{TilePayload, TileRequest};

use super::common::TileSelection;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
pub struct FetchArgs {
    pub selection: TileSelection,
    pub geojson: Option<PathBuf>,
    pub obj: Option<PathBuf>,
    pub texture: Option<PathBuf>,
    pub max_error: Option<f64>,
    pub local: bool,
    pub guard_terrain: bool,
}

/// Run the fetch command.
pub fn run(runner: &CliRunner, args: FetchArgs) -> Result<(), CliError> {
    runner.log_startup("fetch");
    let tile = args.selection.resolve()?;

    // CLI flags override config file values
    let mut config = runner.assembler_config()?;
    if let Some(max_error) = args.max_error {
        if !max_error.is_finite() || max_error < 0.0 {
            return Err(CliError::InvalidArgs(format!(
                "--max-error must be a non-negative number, got {}",
                max_error
            )));
        }
        config = config.with_mesh_max_error(max_error);
    }
    if args.local {
        config = config.with_tile_space(TileSpace::Local);
    }
    if args.guard_terrain {
        config = config.with_guard_terrain(true);
    }

    let assembler = runner.create_assembler(config)?;

    println!("Assembling tile {}", tile);
    let start = Instant::now();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::InvalidArgs(format!("failed to start async runtime: {}", e)))?;
    let payload = runtime.block_on(assembler.assemble(&TileRequest::from_coord(tile)))?;

    println!("Assembled in {:.2}s", start.elapsed().as_secs_f64());
    println!();
    print_summary(&payload);

    write_outputs(&payload, &args)
}

fn print_summary(payload: &TilePayload) {
    let b = &payload.bounds;
    println!("  bounds:   [{:.4}, {:.4}, {:.4}, {:.4}]", b.min_x, b.min_y, b.max_x, b.max_y);
    println!("  space:    {}", payload.space);

    match &payload.terrain {
        Some(mesh) => println!(
            "  terrain:  {} vertices, {} triangles, height {:.1}..{:.1} m",
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.bounding_box[0][2],
            mesh.bounding_box[1][2]
        ),
        None => println!("  terrain:  none"),
    }

    match &payload.texture {
        Some(texture) => println!("  texture:  {}x{}", texture.width, texture.height),
        None => println!("  texture:  none"),
    }

    match &payload.features {
        Some(features) => {
            println!("  features: {}", features.len());
            for layer in features.layers() {
                println!("    {:<20} {}", layer, features.in_layer(layer).count());
            }
        }
        None => println!("  features: none"),
    }
}

fn write_outputs(payload: &TilePayload, args: &FetchArgs) -> Result<(), CliError> {
    if let Some(path) = &args.obj {
        match &payload.terrain {
            Some(mesh) => {
                let file = File::create(path).map_err(|e| write_error(path, e))?;
                mesh.write_obj(BufWriter::new(file))
                    .map_err(|e| write_error(path, e))?;
                println!("Wrote mesh to {}", path.display());
            }
            None => eprintln!("No terrain mesh, skipping {}", path.display()),
        }
    }

    if let Some(path) = &args.texture {
        match &payload.texture {
            Some(texture) => {
                texture.image.save(path).map_err(|e| write_error(path, e))?;
                println!("Wrote texture to {}", path.display());
            }
            None => eprintln!("No texture, skipping {}", path.display()),
        }
    }

    if let Some(path) = &args.geojson {
        match &payload.features {
            Some(features) => {
                let text = features.to_geojson().map_err(|e| write_error(path, e))?;
                std::fs::write(path, text).map_err(|e| write_error(path, e))?;
                println!("Wrote features to {}", path.display());
            }
            None => eprintln!("No features, skipping {}", path.display()),
        }
    }

    Ok(())
}

fn write_error(path: &std::path::Path, error: impl std::fmt::Display) -> CliError {
    CliError::FileWrite {
        path: path.display().to_string(),
        error: error.to_string(),
    }
}
