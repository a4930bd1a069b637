//! Configuration enum types.

use crate::draw::{Color, color::RED};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// color = "red"
///
/// # Hex string
/// color = "#ffcc00"
///
/// # Custom RGB color (0-255 per component)
/// color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, white, black) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// Unknown names default to red with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => Color::parse_css(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using red", name);
                RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    /// CSS string stored on annotations drawn with this color.
    pub fn to_css(&self) -> String {
        self.to_color().to_hex()
    }
}

/// Compression preference for saved annotation documents.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompressionSetting {
    /// Always write plain JSON
    Off,
    /// Always gzip
    On,
    /// Gzip once the payload exceeds the threshold
    Auto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_spec_variants_resolve() {
        assert_eq!(ColorSpec::Name("white".into()).to_css(), "#ffffff");
        assert_eq!(ColorSpec::Name("#00ff00".into()).to_css(), "#00ff00");
        assert_eq!(ColorSpec::Rgb([255, 0, 0]).to_css(), "#ff0000");
        assert_eq!(ColorSpec::Name("mauve-ish".into()).to_color(), RED);
    }

    #[test]
    fn color_spec_parses_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            a: ColorSpec,
            b: ColorSpec,
        }
        let parsed: Wrapper = toml::from_str("a = \"blue\"\nb = [1, 2, 3]").unwrap();
        assert_eq!(parsed.a, ColorSpec::Name("blue".into()));
        assert_eq!(parsed.b, ColorSpec::Rgb([1, 2, 3]));
    }
}
