//! Configuration type definitions.

use super::enums::{ColorSpec, CompressionSetting};
use crate::draw::StrokeStyle;
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Drawing session defaults.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool active when the overlay opens (pointer, pen, highlighter, eraser,
    /// rectangle, circle, arrow, text)
    #[serde(default = "default_tool")]
    pub default_tool: String,

    /// Author name stamped on every annotation drawn locally
    #[serde(default)]
    pub author: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            author: String::new(),
        }
    }
}

/// Stroke style of one tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolStyleConfig {
    /// Stroke color
    pub color: ColorSpec,
    /// Stroke width in pixels (valid range: 1.0 - 50.0)
    pub width: f64,
    /// Stroke opacity (valid range: 0.0 - 1.0)
    pub opacity: f64,
}

impl ToolStyleConfig {
    pub fn to_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color.to_css(),
            width: self.width,
            opacity: self.opacity,
        }
    }
}

/// Per-tool stroke defaults.
///
/// ```toml
/// [tools.highlighter]
/// color = "yellow"
/// width = 16.0
/// opacity = 0.35
/// ```
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ToolsConfig {
    #[serde(default = "default_pen")]
    pub pen: ToolStyleConfig,

    #[serde(default = "default_highlighter")]
    pub highlighter: ToolStyleConfig,

    #[serde(default = "default_eraser")]
    pub eraser: ToolStyleConfig,

    /// Shared by rectangle, circle, arrow and text
    #[serde(default = "default_shapes")]
    pub shapes: ToolStyleConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            pen: default_pen(),
            highlighter: default_highlighter(),
            eraser: default_eraser(),
            shapes: default_shapes(),
        }
    }
}

impl ToolsConfig {
    /// Stroke style per drawing tool, as consumed by the tool selector.
    pub fn build_styles(&self) -> HashMap<Tool, StrokeStyle> {
        Tool::ALL
            .into_iter()
            .filter_map(|tool| {
                let config = match tool {
                    Tool::Pointer => return None,
                    Tool::Pen => &self.pen,
                    Tool::Highlighter => &self.highlighter,
                    Tool::Eraser => &self.eraser,
                    Tool::Rectangle | Tool::Circle | Tool::Arrow | Tool::Text => &self.shapes,
                };
                Some((tool, config.to_style()))
            })
            .collect()
    }

    pub(crate) fn styles_mut(&mut self) -> [(&'static str, &mut ToolStyleConfig); 4] {
        [
            ("pen", &mut self.pen),
            ("highlighter", &mut self.highlighter),
            ("eraser", &mut self.eraser),
            ("shapes", &mut self.shapes),
        ]
    }
}

/// Size of the shared screen the overlay covers.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Surface width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_width")]
    pub width: i32,

    /// Surface height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_height")]
    pub height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Saving annotation documents.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory saved documents go to (defaults to the user's download
    /// directory, then the data directory)
    #[serde(default)]
    pub directory: Option<String>,

    /// `metadata.source` written into saved documents
    #[serde(default = "default_source")]
    pub source: String,

    /// `metadata.quality` written into saved documents
    #[serde(default = "default_quality")]
    pub quality: String,

    /// Gzip saved documents: "off", "on" or "auto"
    #[serde(default = "default_compression")]
    pub compression: CompressionSetting,

    /// Payload size above which "auto" compresses, in KiB
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// Largest document accepted for saving or loading, in MiB (valid range: 1 - 1024)
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            source: default_source(),
            quality: default_quality(),
            compression: default_compression(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

// =============================================================================
// Defaults
// =============================================================================

fn default_tool() -> String {
    "pen".to_string()
}

fn default_pen() -> ToolStyleConfig {
    ToolStyleConfig {
        color: ColorSpec::Name("red".to_string()),
        width: 3.0,
        opacity: 1.0,
    }
}

fn default_highlighter() -> ToolStyleConfig {
    ToolStyleConfig {
        color: ColorSpec::Name("yellow".to_string()),
        width: 16.0,
        opacity: 0.35,
    }
}

fn default_eraser() -> ToolStyleConfig {
    ToolStyleConfig {
        color: ColorSpec::Name("white".to_string()),
        width: 20.0,
        opacity: 1.0,
    }
}

fn default_shapes() -> ToolStyleConfig {
    ToolStyleConfig {
        color: ColorSpec::Name("blue".to_string()),
        width: 3.0,
        opacity: 1.0,
    }
}

fn default_canvas_width() -> i32 {
    1920
}

fn default_canvas_height() -> i32 {
    1080
}

fn default_source() -> String {
    "screen-share".to_string()
}

fn default_quality() -> String {
    "high".to_string()
}

fn default_compression() -> CompressionSetting {
    CompressionSetting::Off
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_max_file_size_mb() -> u64 {
    10
}
