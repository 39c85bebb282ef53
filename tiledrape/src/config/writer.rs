//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!(
        r#"[sources]
; URL templates with {{x}}, {{y}} and {{z}} placeholders.
; Leave a template empty to disable that source.
terrain = {}
; Aerial imagery used at zoom >= texture_zoom_threshold
texture_high_res = {}
; Satellite mosaic used below texture_zoom_threshold
texture_coarse = {}
texture_zoom_threshold = {}
features = {}

[terrain]
; Elevation encoding of the terrain tiles: terrarium or mapbox
encoding = {}
; Maximum mesh error in meters
mesh_max_error = {}

[assembler]
; Output space: geographic (projected mesh, WGS84 features) or local (unit tile)
tile_space = {}
; Assemble tiles without a mesh when terrain fails
guard_terrain = {}
; Assemble tiles without features when they fail
guard_features = {}

[download]
; HTTP request timeout in seconds
timeout = {}

[logging]
; Log file path (empty logs to stderr only)
file = {}
; trace, debug, info, warn or error (RUST_LOG overrides)
level = {}
"#,
        config.sources.terrain,
        config.sources.texture_high_res,
        config.sources.texture_coarse,
        config.sources.texture_zoom_threshold,
        config.sources.features,
        config.terrain.encoding,
        config.terrain.mesh_max_error,
        config.assembler.tile_space,
        config.assembler.guard_terrain,
        config.assembler.guard_features,
        config.download.timeout,
        log_file,
        config.logging.level,
    )
}
