//! Annotation records: one freehand stroke drawn on the overlay.

use super::color::{BLACK, Color};
use crate::input::tool::{self, Tool};
use log::warn;
use serde::{Deserialize, Serialize};

/// Identifier of an annotation, unique within a store.
pub type AnnotationId = String;

/// A point in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Color, width and opacity a tool paints with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// CSS color string, kept verbatim so saved documents round-trip
    pub color: String,
    /// Stroke width in pixels
    pub width: f64,
    /// Opacity multiplier (0.0 - 1.0)
    pub opacity: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: default_stroke_color(),
            width: default_stroke_width(),
            opacity: default_opacity(),
        }
    }
}

/// A single stroke with the style it was drawn with.
///
/// Serialized with the camelCase keys used by the collaboration relay:
/// `id`, `type`, `points`, `strokeColor`, `strokeWidth`, `opacity`,
/// `timestamp`, `author`. Everything except `points` is optional on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(default)]
    pub id: AnnotationId,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "tool::deserialize_lenient"
    )]
    pub tool: Tool,
    pub points: Vec<Point>,
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Creation time in milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub author: String,
}

impl Annotation {
    /// Starts a new single-point annotation.
    pub fn begin(
        id: AnnotationId,
        tool: Tool,
        start: Point,
        style: &StrokeStyle,
        author: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id,
            tool,
            points: vec![start],
            stroke_color: style.color.clone(),
            stroke_width: style.width,
            opacity: style.opacity,
            timestamp,
            author: author.into(),
        }
    }

    /// Resolved stroke color, falling back to black when unparseable.
    pub fn color(&self) -> Color {
        Color::parse_css(&self.stroke_color).unwrap_or_else(|| {
            warn!(
                "Annotation '{}' has unparseable color '{}', using black",
                self.id, self.stroke_color
            );
            BLACK
        })
    }
}

fn default_stroke_color() -> String {
    "#000000".to_string()
}

fn default_stroke_width() -> f64 {
    3.0
}

fn default_opacity() -> f64 {
    1.0
}
