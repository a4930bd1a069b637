//! Keybinding configuration types and parsing.
//!
//! Keyboard shortcuts resolve to an [`Action`], which the input state turns
//! into the same commands pointer events and toolbar clicks produce.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Undo,
    ClearAll,
    Save,

    // Tool selection
    SelectPointer,
    SelectPen,
    SelectHighlighter,
    SelectEraser,
    SelectRectangle,
    SelectCircle,
    SelectArrow,
    SelectText,

    // Width controls
    IncreaseWidth,
    DecreaseWidth,
}

/// A single keybinding: a key with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Delete".
    ///
    /// Modifiers may appear in any order and spaces around '+' are ignored.
    /// A trailing "++" binds the '+' key itself.
    pub fn parse(s: &str) -> Result<Self, String> {
        let normalized: String = s.split_whitespace().collect();
        if normalized.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let (body, plus_key) = match normalized.strip_suffix("++") {
            Some(rest) => (rest, true),
            None if normalized == "+" => ("", true),
            None => (normalized.as_str(), false),
        };

        let mut binding = Self {
            key: String::new(),
            ctrl: false,
            shift: false,
            alt: false,
        };
        for part in body.split('+').filter(|part| !part.is_empty()) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => binding.ctrl = true,
                "shift" => binding.shift = true,
                "alt" => binding.alt = true,
                _ if binding.key.is_empty() => binding.key = part.to_string(),
                _ => return Err(format!("Multiple keys specified in: {}", s)),
            }
        }

        if plus_key {
            if !binding.key.is_empty() {
                return Err(format!("Multiple keys specified in: {}", s));
            }
            binding.key = "+".to_string();
        }

        if binding.key.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }
        Ok(binding)
    }

    /// Lookup key with the key name case-folded.
    pub fn normalized(mut self) -> Self {
        self.key = self.key.to_lowercase();
        self
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// clear_all = ["Delete"]
/// select_highlighter = ["H"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_clear_all")]
    pub clear_all: Vec<String>,

    #[serde(default = "default_save")]
    pub save: Vec<String>,

    #[serde(default = "default_select_pointer")]
    pub select_pointer: Vec<String>,

    #[serde(default = "default_select_pen")]
    pub select_pen: Vec<String>,

    #[serde(default = "default_select_highlighter")]
    pub select_highlighter: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,

    #[serde(default = "default_select_rectangle")]
    pub select_rectangle: Vec<String>,

    #[serde(default = "default_select_circle")]
    pub select_circle: Vec<String>,

    #[serde(default = "default_select_arrow")]
    pub select_arrow: Vec<String>,

    #[serde(default = "default_select_text")]
    pub select_text: Vec<String>,

    #[serde(default = "default_increase_width")]
    pub increase_width: Vec<String>,

    #[serde(default = "default_decrease_width")]
    pub decrease_width: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            clear_all: default_clear_all(),
            save: default_save(),
            select_pointer: default_select_pointer(),
            select_pen: default_select_pen(),
            select_highlighter: default_select_highlighter(),
            select_eraser: default_select_eraser(),
            select_rectangle: default_select_rectangle(),
            select_circle: default_select_circle(),
            select_arrow: default_select_arrow(),
            select_text: default_select_text(),
            increase_width: default_increase_width(),
            decrease_width: default_decrease_width(),
        }
    }
}

impl KeybindingsConfig {
    fn bindings(&self) -> [(&[String], Action); 13] {
        [
            (&self.undo, Action::Undo),
            (&self.clear_all, Action::ClearAll),
            (&self.save, Action::Save),
            (&self.select_pointer, Action::SelectPointer),
            (&self.select_pen, Action::SelectPen),
            (&self.select_highlighter, Action::SelectHighlighter),
            (&self.select_eraser, Action::SelectEraser),
            (&self.select_rectangle, Action::SelectRectangle),
            (&self.select_circle, Action::SelectCircle),
            (&self.select_arrow, Action::SelectArrow),
            (&self.select_text, Action::SelectText),
            (&self.increase_width, Action::IncreaseWidth),
            (&self.decrease_width, Action::DecreaseWidth),
        ]
    }

    /// Build a lookup map from keybindings to actions.
    ///
    /// Returns an error if any keybinding string is invalid or if the same
    /// binding is assigned twice.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();
        for (strings, action) in self.bindings() {
            for binding_str in strings {
                let binding = KeyBinding::parse(binding_str)?.normalized();
                if let Some(existing) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing, action
                    ));
                }
            }
        }
        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_undo() -> Vec<String> {
    keys(&["Ctrl+Z"])
}

fn default_clear_all() -> Vec<String> {
    keys(&["Delete", "Ctrl+Shift+X"])
}

fn default_save() -> Vec<String> {
    keys(&["Ctrl+S"])
}

fn default_select_pointer() -> Vec<String> {
    keys(&["V", "Escape"])
}

fn default_select_pen() -> Vec<String> {
    keys(&["P"])
}

fn default_select_highlighter() -> Vec<String> {
    keys(&["H"])
}

fn default_select_eraser() -> Vec<String> {
    keys(&["E"])
}

fn default_select_rectangle() -> Vec<String> {
    keys(&["R"])
}

fn default_select_circle() -> Vec<String> {
    keys(&["C"])
}

fn default_select_arrow() -> Vec<String> {
    keys(&["A"])
}

fn default_select_text() -> Vec<String> {
    keys(&["T"])
}

fn default_increase_width() -> Vec<String> {
    keys(&["+", "="])
}

fn default_decrease_width() -> Vec<String> {
    keys(&["-", "_"])
}
