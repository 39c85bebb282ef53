//! XYZ tile URL templates.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::coord::TileCoord;

/// Placeholder names a template may contain.
const KNOWN_PLACEHOLDERS: [&str; 3] = ["x", "y", "z"];

/// Errors raised while parsing a URL template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Template was empty or only whitespace
    #[error("URL template is empty")]
    Empty,

    /// Template contains a `{name}` placeholder other than x, y or z
    #[error("Unknown placeholder '{placeholder}' in template '{template}'")]
    UnknownPlaceholder {
        template: String,
        placeholder: String,
    },

    /// Template does not expand to an absolute URL
    #[error("Template '{template}' does not produce a valid URL: {reason}")]
    InvalidUrl { template: String, reason: String },
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern is valid"))
}

/// A URL containing `{x}`, `{y}` and `{z}` placeholders.
///
/// # Example
///
/// ```
/// use tiledrape::coord::TileCoord;
/// use tiledrape::source::TileUrlTemplate;
///
/// let template = TileUrlTemplate::parse("https://tiles.example.com/{z}/{x}/{y}.png").unwrap();
/// let url = template.expand(&TileCoord { x: 3, y: 5, z: 10 });
/// assert_eq!(url, "https://tiles.example.com/10/3/5.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileUrlTemplate {
    template: String,
}

impl TileUrlTemplate {
    /// Parses and validates a template.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let template = template.trim();
        if template.is_empty() {
            return Err(TemplateError::Empty);
        }

        for captures in placeholder_pattern().captures_iter(template) {
            let name = &captures[1];
            if !KNOWN_PLACEHOLDERS.contains(&name) {
                return Err(TemplateError::UnknownPlaceholder {
                    template: template.to_string(),
                    placeholder: name.to_string(),
                });
            }
        }

        let parsed = Self {
            template: template.to_string(),
        };

        let sample = parsed.expand(&TileCoord { x: 0, y: 0, z: 0 });
        reqwest::Url::parse(&sample).map_err(|e| TemplateError::InvalidUrl {
            template: template.to_string(),
            reason: e.to_string(),
        })?;

        Ok(parsed)
    }

    /// Parses an optional template, treating empty strings as "no source".
    pub fn parse_optional(template: &str) -> Result<Option<Self>, TemplateError> {
        if template.trim().is_empty() {
            return Ok(None);
        }
        Self::parse(template).map(Some)
    }

    /// Substitutes every placeholder with the tile's coordinates.
    pub fn expand(&self, tile: &TileCoord) -> String {
        self.template
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
            .replace("{z}", &tile.z.to_string())
    }

    /// The raw template string.
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl fmt::Display for TileUrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
