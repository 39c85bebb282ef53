//! INI parsing logic for converting `Ini` → `ConfigFile`.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::MAX_ZOOM;
use crate::source::TileUrlTemplate;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [sources] section
    if let Some(section) = ini.section(Some("sources")) {
        if let Some(v) = section.get("terrain") {
            config.sources.terrain = parse_template("terrain", v)?;
        }
        if let Some(v) = section.get("texture_high_res") {
            config.sources.texture_high_res = parse_template("texture_high_res", v)?;
        }
        if let Some(v) = section.get("texture_coarse") {
            config.sources.texture_coarse = parse_template("texture_coarse", v)?;
        }
        if let Some(v) = section.get("features") {
            config.sources.features = parse_template("features", v)?;
        }
        if let Some(v) = section.get("texture_zoom_threshold") {
            config.sources.texture_zoom_threshold = v
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|z| *z <= MAX_ZOOM)
                .ok_or_else(|| {
                    invalid("sources", "texture_zoom_threshold", v, "must be a zoom level 0-24")
                })?;
        }
    }

    // [terrain] section
    if let Some(section) = ini.section(Some("terrain")) {
        if let Some(v) = section.get("encoding") {
            config.terrain.encoding = v
                .parse()
                .map_err(|reason: String| invalid("terrain", "encoding", v, &reason))?;
        }
        if let Some(v) = section.get("mesh_max_error") {
            config.terrain.mesh_max_error = v
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|e| e.is_finite() && *e >= 0.0)
                .ok_or_else(|| {
                    invalid("terrain", "mesh_max_error", v, "must be a non-negative number")
                })?;
        }
    }

    // [assembler] section
    if let Some(section) = ini.section(Some("assembler")) {
        if let Some(v) = section.get("tile_space") {
            config.assembler.tile_space = v
                .parse()
                .map_err(|_| invalid("assembler", "tile_space", v, "must be geographic or local"))?;
        }
        if let Some(v) = section.get("guard_terrain") {
            config.assembler.guard_terrain = parse_bool("assembler", "guard_terrain", v)?;
        }
        if let Some(v) = section.get("guard_features") {
            config.assembler.guard_features = parse_bool("assembler", "guard_features", v)?;
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            config.download.timeout = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|t| *t > 0)
                .ok_or_else(|| invalid("download", "timeout", v, "must be a positive number of seconds"))?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            config.logging.file = if v.is_empty() {
                None
            } else {
                Some(expand_tilde(v))
            };
        }
        if let Some(v) = section.get("level") {
            let level = v.trim().to_lowercase();
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(invalid(
                    "logging",
                    "level",
                    v,
                    "must be one of: trace, debug, info, warn, error",
                ));
            }
            config.logging.level = level;
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Validates a template, keeping empty values as "source disabled".
fn parse_template(key: &str, value: &str) -> Result<String, ConfigFileError> {
    let value = value.trim();
    TileUrlTemplate::parse_optional(value)
        .map_err(|e| invalid("sources", key, value, &e.to_string()))?;
    Ok(value.to_string())
}

pub(super) fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool, ConfigFileError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(section, key, value, "expected true or false")),
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use crate::config::settings::ElevationEncoding;
    use crate::coord::TileSpace;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        parse_ini(&Ini::load_from_str(content).unwrap())
    }

    #[test]
    fn test_empty_ini_gives_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.sources.terrain, DEFAULT_TERRAIN_URL);
    }

    #[test]
    fn test_overlay_values() {
        let config = parse(
            r#"
[sources]
terrain =
texture_zoom_threshold = 14
features = https://tiles.example/{z}/{x}/{y}.mvt

[terrain]
encoding = mapbox
mesh_max_error = 2.5

[assembler]
tile_space = local
guard_terrain = yes
guard_features = false

[download]
timeout = 5

[logging]
level = DEBUG
"#,
        )
        .unwrap();

        assert_eq!(config.sources.terrain, "");
        assert_eq!(config.sources.texture_zoom_threshold, 14);
        assert_eq!(config.sources.features, "https://tiles.example/{z}/{x}/{y}.mvt");
        assert_eq!(config.sources.texture_coarse, DEFAULT_TEXTURE_COARSE_URL);
        assert_eq!(config.terrain.encoding, ElevationEncoding::Mapbox);
        assert_eq!(config.terrain.mesh_max_error, 2.5);
        assert_eq!(config.assembler.tile_space, TileSpace::Local);
        assert!(config.assembler.guard_terrain);
        assert!(!config.assembler.guard_features);
        assert_eq!(config.download.timeout, 5);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_rejects_unknown_placeholder() {
        let err = parse("[sources]\nterrain = https://t.example/{level}/{x}/{y}.png\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref key, .. } if key == "terrain"
        ));
    }

    #[test]
    fn test_rejects_unknown_encoding() {
        let err = parse("[terrain]\nencoding = lerc\n").unwrap_err();
        assert!(err.to_string().contains("terrain.encoding"));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(parse("[terrain]\nmesh_max_error = -1\n").is_err());
        assert!(parse("[sources]\ntexture_zoom_threshold = 30\n").is_err());
        assert!(parse("[download]\ntimeout = 0\n").is_err());
        assert!(parse("[assembler]\nguard_terrain = maybe\n").is_err());
        assert!(parse("[assembler]\ntile_space = ecef\n").is_err());
        assert!(parse("[logging]\nlevel = loud\n").is_err());
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/var/log/x.log"), PathBuf::from("/var/log/x.log"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.log"), home.join("x.log"));
        }
    }
}
