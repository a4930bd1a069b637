use crate::config::{CompressionSetting, ExportConfig};
use anyhow::{Result, anyhow};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB

/// Compression preference for saved documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always write plain JSON.
    Off,
    /// Always write gzip-compressed JSON.
    On,
    /// Write gzip when payload exceeds the configured threshold.
    Auto,
}

impl From<CompressionSetting> for CompressionMode {
    fn from(setting: CompressionSetting) -> Self {
        match setting {
            CompressionSetting::Off => CompressionMode::Off,
            CompressionSetting::On => CompressionMode::On,
            CompressionSetting::Auto => CompressionMode::Auto,
        }
    }
}

/// Runtime options derived from configuration for saving and loading documents.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub base_dir: PathBuf,
    pub source: String,
    pub quality: String,
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
    pub max_file_size_bytes: u64,
}

impl ExportOptions {
    /// Creates an options struct with defaults rooted at `base_dir`.
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            source: "screen-share".to_string(),
            quality: "high".to_string(),
            compression: CompressionMode::Off,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
            max_file_size_bytes: 10 * 1024 * 1024,
        }
    }

    /// Default file name for a save made at `when`.
    pub fn file_path_at(&self, when: DateTime<Local>) -> PathBuf {
        self.base_dir
            .join(format!("annotations-{}.json", when.format("%Y%m%d-%H%M%S")))
    }

    pub fn lock_file_path(&self, target: &Path) -> PathBuf {
        target
            .parent()
            .unwrap_or(&self.base_dir)
            .join(".sharemark.lock")
    }

    pub(crate) fn should_compress(&self, payload_len: usize) -> bool {
        match self.compression {
            CompressionMode::Off => false,
            CompressionMode::On => true,
            CompressionMode::Auto => payload_len as u64 >= self.auto_compress_threshold_bytes,
        }
    }
}

/// Builds export options from the `[export]` config section.
///
/// The directory falls back to the user's download directory, then to the
/// data directory.
pub fn options_from_config(config: &ExportConfig) -> Result<ExportOptions> {
    let base_dir = match &config.directory {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(expand_tilde(dir.trim())),
        _ => dirs::download_dir()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("sharemark")))
            .ok_or_else(|| anyhow!("could not determine a directory for saved annotations"))?,
    };

    let mut options = ExportOptions::new(base_dir);
    options.source = config.source.clone();
    options.quality = config.quality.clone();
    options.compression = config.compression.into();
    options.auto_compress_threshold_bytes =
        config.auto_compress_threshold_kb.saturating_mul(1024);
    options.max_file_size_bytes = config.max_file_size_mb.saturating_mul(1024 * 1024);
    Ok(options)
}

fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
