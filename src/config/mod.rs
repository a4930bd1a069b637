//! Configuration file support for sharemark.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sharemark/config.toml`. Settings include tool styles, the
//! canvas size, export metadata and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::{ColorSpec, CompressionSetting};
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{CanvasConfig, DrawingConfig, ExportConfig, ToolStyleConfig, ToolsConfig};

use crate::input::Tool;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "pen"
/// author = "Interviewer"
///
/// [tools.pen]
/// color = "red"
/// width = 3.0
/// opacity = 1.0
///
/// [canvas]
/// width = 1920
/// height = 1080
///
/// [export]
/// source = "screen-share"
/// quality = "high"
/// compression = "auto"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Session defaults (initial tool, author)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Stroke style per tool
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Overlay surface size
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Saved document settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - tool `width`: 1.0 - 50.0
    /// - tool `opacity`: 0.0 - 1.0
    /// - canvas `width`/`height`: 1 - 16384
    /// - `max_file_size_mb`: 1 - 1024
    /// - `auto_compress_threshold_kb`: 1 - 1048576
    fn validate_and_clamp(&mut self) {
        for (name, style) in self.tools.styles_mut() {
            if !(1.0..=50.0).contains(&style.width) {
                warn!(
                    "Invalid {} width {:.1}, clamping to 1.0-50.0 range",
                    name, style.width
                );
                style.width = style.width.clamp(1.0, 50.0);
            }
            if !(0.0..=1.0).contains(&style.opacity) {
                warn!(
                    "Invalid {} opacity {:.2}, clamping to 0.0-1.0 range",
                    name, style.opacity
                );
                style.opacity = style.opacity.clamp(0.0, 1.0);
            }
        }

        for (name, value) in [
            ("canvas width", &mut self.canvas.width),
            ("canvas height", &mut self.canvas.height),
        ] {
            if !(1..=16384).contains(&*value) {
                warn!("Invalid {} {}, clamping to 1-16384 range", name, value);
                *value = (*value).clamp(1, 16384);
            }
        }

        if !(1..=1024).contains(&self.export.max_file_size_mb) {
            warn!(
                "Invalid max_file_size_mb {}, clamping to 1-1024 range",
                self.export.max_file_size_mb
            );
            self.export.max_file_size_mb = self.export.max_file_size_mb.clamp(1, 1024);
        }

        if !(1..=1_048_576).contains(&self.export.auto_compress_threshold_kb) {
            warn!(
                "Invalid auto_compress_threshold_kb {}, clamping to 1-1048576 range",
                self.export.auto_compress_threshold_kb
            );
            self.export.auto_compress_threshold_kb =
                self.export.auto_compress_threshold_kb.clamp(1, 1_048_576);
        }

        if self.drawing.default_tool.parse::<Tool>().is_err() {
            warn!(
                "Invalid default_tool '{}', falling back to 'pen'",
                self.drawing.default_tool
            );
            self.drawing.default_tool = "pen".to_string();
        }
    }

    /// Tool active when a session starts.
    pub fn initial_tool(&self) -> Tool {
        self.drawing.default_tool.parse().unwrap_or_default()
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sharemark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is absent.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the documented example config to the user's config directory.
    ///
    /// # Errors
    /// Returns an error if a config file already exists or cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        fs::write(&config_path, include_str!("../../config.example.toml"))
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.canvas.width, 1920);
        assert_eq!(config.initial_tool(), Tool::Pen);
        assert_eq!(config.export.compression, CompressionSetting::Off);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[drawing]
default_tool = "lasso"

[tools.highlighter]
color = "yellow"
width = 400.0
opacity = 2.0

[canvas]
width = 0
height = 720

[export]
max_file_size_mb = 0
auto_compress_threshold_kb = 9223372036854775807
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tools.highlighter.width, 50.0);
        assert_eq!(config.tools.highlighter.opacity, 1.0);
        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.height, 720);
        assert_eq!(config.export.max_file_size_mb, 1);
        assert_eq!(config.export.auto_compress_threshold_kb, 1_048_576);
        assert_eq!(config.drawing.default_tool, "pen");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[canvas\nwidth = 3").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../config.example.toml")).unwrap();
        assert!(config.keybindings.build_action_map().is_ok());
        assert_eq!(config.export.source, "screen-share");
    }

    #[test]
    fn tool_styles_cover_every_drawing_tool() {
        let styles = ToolsConfig::default().build_styles();
        assert!(!styles.contains_key(&Tool::Pointer));
        assert_eq!(styles[&Tool::Highlighter].color, "#ffff00");
        assert_eq!(styles[&Tool::Arrow], styles[&Tool::Text]);
    }
}
