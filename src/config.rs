//! Viewer configuration module.
//!
//! Handles loading, validating, and merging `flipbook.toml`. Stock defaults
//! are the base layer; a user config file only needs the keys it overrides.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [book]
//! dir = "public/book"        # Directory holding the page images
//! manifest = "book.json"     # Manifest filename, written inside `dir`
//! base_url = "book/"         # URL prefix the viewer puts before each filename
//!
//! [sound]
//! enabled = true
//! path = "flip.mp3"          # Page-flip cue, relative to the site root
//! volume = 0.3               # 0.0 - 1.0
//!
//! [layout]
//! width = 360                # Book width in CSS pixels
//! height = 560               # Book height in CSS pixels
//! easing = "cubic-bezier(.22,.61,.36,1)"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

pub const CONFIG_FILE: &str = "flipbook.toml";

/// Viewer configuration loaded from `flipbook.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Where the book lives and how its pages are addressed.
    pub book: BookConfig,
    /// Page-flip sound cue.
    pub sound: SoundConfig,
    /// Book dimensions and animation easing.
    pub layout: LayoutConfig,
}

impl ViewerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.sound.volume) {
            return Err(ConfigError::Validation(
                "sound.volume must be between 0.0 and 1.0".into(),
            ));
        }
        if self.layout.width == 0 || self.layout.height == 0 {
            return Err(ConfigError::Validation(
                "layout.width and layout.height must be non-zero".into(),
            ));
        }
        if self.book.manifest.trim().is_empty() {
            return Err(ConfigError::Validation(
                "book.manifest must not be empty".into(),
            ));
        }
        let sound_path = Path::new(&self.sound.path);
        if sound_path.is_absolute()
            || sound_path
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ConfigError::Validation(
                "sound.path must be relative and stay inside the site root".into(),
            ));
        }
        Ok(())
    }

    /// Full path of the manifest file inside the book directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.book.dir.join(&self.book.manifest)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    /// Directory holding the page images.
    pub dir: PathBuf,
    /// Manifest filename, relative to `dir`.
    pub manifest: String,
    /// Prefix joined with each manifest filename to form the image URL.
    pub base_url: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public/book"),
            manifest: "book.json".to_string(),
            base_url: "book/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SoundConfig {
    pub enabled: bool,
    /// Cue file, relative to the site root.
    pub path: String,
    pub volume: f64,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "flip.mp3".to_string(),
            volume: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub width: u32,
    pub height: u32,
    /// CSS timing function for the flip transform.
    pub easing: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 360,
            height: 560,
            easing: "cubic-bezier(.22,.61,.36,1)".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ViewerConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ViewerConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ViewerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<ViewerConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        log::debug!("no config at {}, using defaults", path.display());
    }
    resolve_config(overlay)
}

/// Returns a fully-commented stock `flipbook.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Flipbook Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Book location
# ---------------------------------------------------------------------------
[book]
# Directory holding the page images (jpg, jpeg, png, webp).
dir = "public/book"

# Manifest filename, written inside the book directory.
manifest = "book.json"

# URL prefix the viewer puts in front of every manifest filename.
base_url = "book/"

# ---------------------------------------------------------------------------
# Page-flip sound
# ---------------------------------------------------------------------------
[sound]
enabled = true

# Cue file, relative to the site root. A missing file just means silence.
path = "flip.mp3"

# Playback volume, 0.0 - 1.0.
volume = 0.3

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Book size in CSS pixels.
width = 360
height = 560

# CSS timing function used for the flip animation.
easing = "cubic-bezier(.22,.61,.36,1)"
"##
}
