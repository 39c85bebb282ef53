//! Urls command - print the source URLs resolved for a tile.

use super::common::TileSelection;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the urls command.
pub fn run(runner: &CliRunner, selection: &TileSelection) -> Result<(), CliError> {
    let tile = selection.resolve()?;
    let config = runner.assembler_config()?;
    let urls = config.sources.resolve(&tile);

    let show = |url: Option<String>| url.unwrap_or_else(|| "(disabled)".to_string());

    println!("Tile {}", tile);
    println!("  terrain:  {}", show(urls.terrain));
    println!(
        "  texture:  {} ({} source, threshold z{})",
        show(urls.texture),
        if tile.z >= config.sources.texture.threshold {
            "high-res"
        } else {
            "coarse"
        },
        config.sources.texture.threshold
    );
    println!("  features: {}", show(urls.features));
    println!("  timeout:  {}s", runner.config().download.timeout);
    Ok(())
}
