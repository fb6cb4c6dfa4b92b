//! Images directory resolution.
//!
//! A post keeps its photos in a subdirectory next to its text. The preferred
//! name comes from the config (`images` by default); when that directory is
//! missing, the first subdirectory whose name looks like it holds pictures
//! is used instead:
//!
//! ```text
//! posts/2025-08-29/
//! ├── index.qmd
//! └── Whistler Photos/     ← detected: name contains "photo"
//!     └── IMG_0042.JPG
//! ```
//!
//! Subdirectories are considered in name order so the choice is stable
//! between runs.

use crate::config::GalleryConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("base directory does not exist: {0}")]
    MissingBase(PathBuf),
    #[error("no images folder found at '{}' and no candidate directories detected", expected.display())]
    NotFound { expected: PathBuf, base: PathBuf },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A resolved images directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagesDir {
    pub path: PathBuf,
    /// True when found by keyword rather than by the configured name.
    pub detected: bool,
}

/// Resolve the directory holding a post's source images.
pub fn locate_images_dir(base: &Path, config: &GalleryConfig) -> Result<ImagesDir, LocateError> {
    if !base.is_dir() {
        return Err(LocateError::MissingBase(base.to_path_buf()));
    }

    let preferred = base.join(&config.images_dir);
    if preferred.is_dir() {
        return Ok(ImagesDir {
            path: preferred,
            detected: false,
        });
    }

    let keywords: Vec<String> = config
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    let mut subdirs: Vec<PathBuf> = fs::read_dir(base)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    subdirs.sort();

    subdirs
        .into_iter()
        .find(|dir| {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            keywords.iter().any(|k| name.contains(k.as_str()))
        })
        .map(|path| ImagesDir {
            path,
            detected: true,
        })
        .ok_or_else(|| LocateError::NotFound {
            expected: preferred,
            base: base.to_path_buf(),
        })
}

/// Sorted names of the entries in a directory, for diagnostics.
pub fn list_dir(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    Ok(names)
}
