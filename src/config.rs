//! Gallery configuration.
//!
//! Every run is driven by one [`GalleryConfig`] record. Stock defaults are
//! overridden by an optional `gallery.toml` in the post directory, and the
//! CLI can override the base name and extension on top of that.
//!
//! ## Config File Location
//!
//! ```text
//! posts/2025-08-29/
//! ├── gallery.toml        # optional
//! ├── index.qmd
//! └── images/
//!     ├── IMG_0042.JPG
//!     └── IMG_0043.JPG
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_name = "Photo"          # Base for image names and the Markdown file
//! extension = ".jpeg"          # Final extension (leading dot added if missing)
//! images_dir = "images"        # Preferred images directory name
//! keywords = ["image", "images", "photo", "photos", "pic", "pics"]
//! extended_formats = false     # Also accept .gif and .webp
//! order = "capture-time"       # or "filename"
//! caption = "base-name"        # or "stem"
//! markdown = "beside-base"     # or "in-images"
//! link_dir = "images"          # Directory prefix used in image links
//! temp_prefix = "__tmprename__"
//! ```
//!
//! Config files are sparse, override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::naming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the per-post config file.
pub const CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// How source images are ordered before numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderMode {
    /// EXIF capture time, falling back to file modification time.
    CaptureTime,
    /// Current file name, case-sensitive lexicographic.
    Filename,
}

/// What goes into the alt text of each gallery block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionStyle {
    /// The capitalized base name (`Whistler`).
    BaseName,
    /// The final file stem (`Whistler01`).
    Stem,
}

/// Where the Markdown gallery document is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkdownPlacement {
    /// In the post directory, next to the images directory.
    BesideBase,
    /// Inside the images directory.
    InImages,
}

/// Configuration record passed into every pipeline component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Base for final image names and the Markdown file name.
    pub base_name: String,
    /// Final image extension, always with a leading dot after loading.
    pub extension: String,
    /// Directory name tried first when locating the images.
    pub images_dir: String,
    /// Case-insensitive name fragments that identify a fallback images directory.
    pub keywords: Vec<String>,
    /// Accept `.gif` and `.webp` sources in addition to `.jpg`, `.jpeg`, `.png`.
    pub extended_formats: bool,
    /// Ordering applied before numbering.
    pub order: OrderMode,
    /// Alt text style of gallery blocks.
    pub caption: CaptionStyle,
    /// Location of the generated Markdown document.
    pub markdown: MarkdownPlacement,
    /// Directory prefix used in image links (`images/Whistler01.jpeg`).
    pub link_dir: String,
    /// Reserved prefix for intermediate names during a two-phase rename.
    pub temp_prefix: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_name: "Photo".to_string(),
            extension: ".jpeg".to_string(),
            images_dir: "images".to_string(),
            keywords: ["image", "images", "photo", "photos", "pic", "pics"]
                .into_iter()
                .map(String::from)
                .collect(),
            extended_formats: false,
            order: OrderMode::CaptureTime,
            caption: CaptionStyle::BaseName,
            markdown: MarkdownPlacement::BesideBase,
            link_dir: "images".to_string(),
            temp_prefix: "__tmprename__".to_string(),
        }
    }
}

const BASE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const EXTENDED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

impl GalleryConfig {
    /// Source extensions accepted for this run, lowercase and without dot.
    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        if self.extended_formats {
            EXTENDED_EXTENSIONS
        } else {
            BASE_EXTENSIONS
        }
    }

    /// Name of the Markdown document, `{base_name}.md`.
    pub fn markdown_file_name(&self) -> String {
        format!("{}.md", self.base_name)
    }

    /// Apply CLI overrides, then re-normalize and re-validate.
    pub fn apply_overrides(
        &mut self,
        base_name: Option<String>,
        extension: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(base_name) = base_name {
            self.base_name = base_name;
        }
        if let Some(extension) = extension {
            self.extension = extension;
        }
        self.normalize();
        self.validate()
    }

    fn normalize(&mut self) {
        if !self.extension.is_empty() {
            self.extension = naming::normalize_extension(&self.extension);
        }
    }

    /// Validate that names are usable as single path components.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let components = [
            ("base_name", &self.base_name),
            ("extension", &self.extension),
            ("images_dir", &self.images_dir),
            ("temp_prefix", &self.temp_prefix),
        ];
        for (key, value) in components {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "{key} must not contain path separators"
                )));
            }
        }
        if self.extension == "." {
            return Err(ConfigError::Validation(
                "extension must have at least one character after the dot".into(),
            ));
        }
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation("keywords must not be empty".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
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

/// Load `gallery.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize, normalize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let mut config: GalleryConfig = merged.try_into()?;
    config.normalize();
    config.validate()?;
    Ok(config)
}

/// Load the config for a post directory, falling back to stock defaults.
pub fn load_config(dir: &Path) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# seq-gal configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Place this file in the post directory as gallery.toml.
# Unknown keys will cause an error.

# Base for the final image names (Photo01.jpeg, Photo02.jpeg, ...)
# and for the Markdown document (Photo.md).
base_name = "Photo"

# Final image extension. The file content is not re-encoded.
extension = ".jpeg"

# ---------------------------------------------------------------------------
# Locating the images
# ---------------------------------------------------------------------------
# Directory tried first.
images_dir = "images"

# When images_dir is missing, the first subdirectory whose name contains
# one of these (case-insensitive) is used instead.
keywords = ["image", "images", "photo", "photos", "pic", "pics"]

# Accept .gif and .webp in addition to .jpg, .jpeg and .png.
extended_formats = false

# ---------------------------------------------------------------------------
# Ordering
# ---------------------------------------------------------------------------
# "capture-time": EXIF DateTimeOriginal, falling back to modification time.
# "filename":     current file name, case-sensitive.
order = "capture-time"

# ---------------------------------------------------------------------------
# Gallery document
# ---------------------------------------------------------------------------
# Alt text of each block: "base-name" (Photo) or "stem" (Photo01).
caption = "base-name"

# "beside-base" writes Photo.md in the post directory,
# "in-images" writes it inside the images directory.
markdown = "beside-base"

# Directory prefix used in image links: ![Photo](images/Photo01.jpeg)
link_dir = "images"

# ---------------------------------------------------------------------------
# Renaming
# ---------------------------------------------------------------------------
# Prefix of the intermediate names used while renaming.
temp_prefix = "__tmprename__"
"##
}
