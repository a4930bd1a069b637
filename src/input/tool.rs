//! Drawing tool selection and cursor affordance.

use crate::draw::StrokeStyle;
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// Only [`Tool::Pointer`] changes control flow (view-only, no strokes); every
/// other tool records a freehand stroke tagged with the tool that drew it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// View-only mode, pointer events pass through
    Pointer,
    /// Freehand pen (default drawing tool)
    Pen,
    /// Wide translucent stroke
    Highlighter,
    /// Removes ink under the stroke
    Eraser,
    /// Rectangle shape tool (drawn freehand)
    Rectangle,
    /// Circle shape tool (drawn freehand)
    Circle,
    /// Arrow shape tool (drawn freehand)
    Arrow,
    /// Text tool (drawn freehand)
    Text,
}

impl Default for Tool {
    fn default() -> Self {
        Self::Pen
    }
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 8] = [
        Tool::Pointer,
        Tool::Pen,
        Tool::Highlighter,
        Tool::Eraser,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Arrow,
        Tool::Text,
    ];

    /// Identifier used in saved documents and replay scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Pointer => "pointer",
            Tool::Pen => "pen",
            Tool::Highlighter => "highlighter",
            Tool::Eraser => "eraser",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Arrow => "arrow",
            Tool::Text => "text",
        }
    }

    /// Whether pointer-down with this tool starts a stroke.
    pub fn draws(&self) -> bool {
        !matches!(self, Tool::Pointer)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == name)
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}

/// Deserializes a tool name, treating unknown names as [`Tool::Pen`].
///
/// Loaded documents may come from newer clients with tools we do not know;
/// their strokes still render as freehand ink.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Tool, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(name.parse().unwrap_or_else(|_| {
        warn!("Unknown annotation type '{}', treating as pen", name);
        Tool::Pen
    }))
}

/// Cursor shown over the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Crosshair,
    Cell,
    Text,
}

impl Cursor {
    /// CSS cursor keyword.
    pub fn as_css(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Crosshair => "crosshair",
            Cursor::Cell => "cell",
            Cursor::Text => "text",
        }
    }
}

/// Static tool-name to cursor lookup; unknown names get the default cursor.
pub fn cursor_for(name: &str) -> Cursor {
    match name {
        "pen" | "highlighter" | "rectangle" | "circle" | "arrow" => Cursor::Crosshair,
        "eraser" => Cursor::Cell,
        "text" => Cursor::Text,
        _ => Cursor::Default,
    }
}

/// Active tool plus the stroke style each drawing tool uses.
#[derive(Debug, Clone)]
pub struct ToolSelector {
    active: Tool,
    cursor: Cursor,
    styles: HashMap<Tool, StrokeStyle>,
}

impl ToolSelector {
    /// Creates a selector with `initial` active and the given per-tool styles.
    ///
    /// Tools missing from `styles` fall back to [`StrokeStyle::default`].
    pub fn new(initial: Tool, styles: HashMap<Tool, StrokeStyle>) -> Self {
        Self {
            active: initial,
            cursor: cursor_for(initial.as_str()),
            styles,
        }
    }

    pub fn active(&self) -> Tool {
        self.active
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Records the active tool and updates the cursor.
    pub fn select(&mut self, tool: Tool) {
        debug!("Tool selected: {}", tool);
        self.active = tool;
        self.cursor = cursor_for(tool.as_str());
    }

    /// Selects a tool by identifier. Unknown identifiers fall back to the
    /// pointer tool and the default cursor.
    pub fn select_named(&mut self, name: &str) {
        match name.parse::<Tool>() {
            Ok(tool) => self.select(tool),
            Err(err) => {
                warn!("{}; falling back to pointer", err);
                self.active = Tool::Pointer;
                self.cursor = Cursor::Default;
            }
        }
    }

    /// Style the given tool paints with.
    pub fn style_for(&self, tool: Tool) -> StrokeStyle {
        self.styles.get(&tool).cloned().unwrap_or_default()
    }

    /// Style of the active tool.
    pub fn active_style(&self) -> StrokeStyle {
        self.style_for(self.active)
    }

    /// Mutable style of the active tool, created from defaults on first use.
    pub fn active_style_mut(&mut self) -> &mut StrokeStyle {
        self.styles.entry(self.active).or_default()
    }
}

impl Default for ToolSelector {
    fn default() -> Self {
        Self::new(Tool::Pen, HashMap::new())
    }
}
