//! Candidate collection and ordering.
//!
//! Lists the images directory, keeps the files whose extension is accepted
//! for this run, derives an [`OrderingKey`] for each and sorts them into the
//! order they will be numbered in.
//!
//! ## Candidates
//!
//! - Regular files only; subdirectories are ignored.
//! - Hidden files (`.DS_Store`, `._IMG_0042.jpg`) are skipped.
//! - Extension match is case-insensitive: `IMG_0042.JPG` is a `.jpg`.
//!
//! ## Ordering
//!
//! The listing is first sorted by file name, then stably sorted by key, so
//! files with equal keys keep their name order. With
//! [`OrderMode::CaptureTime`] the key is the EXIF capture time or the
//! modification time (see [`crate::metadata`]); with [`OrderMode::Filename`]
//! it is the file name itself.

use crate::config::{GalleryConfig, OrderMode};
use crate::metadata;
use crate::naming;
use crate::types::{ImageEntry, OrderingKey};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot read modification time of {}: {source}", path.display())]
    Timestamp {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Collect and order the source images of a directory.
pub fn scan(images_dir: &Path, config: &GalleryConfig) -> Result<Vec<ImageEntry>, ScanError> {
    let accepted = config.accepted_extensions();
    let mut entries = collect_candidates(images_dir, accepted)?
        .into_iter()
        .map(|path| build_entry(path, config.order))
        .collect::<Result<Vec<_>, _>>()?;

    order_entries(&mut entries);
    Ok(entries)
}

/// Stable sort by ordering key; equal keys keep their current order.
pub fn order_entries(entries: &mut [ImageEntry]) {
    entries.sort_by(|a, b| a.key.sort_cmp(&b.key));
}

fn collect_candidates(dir: &Path, accepted: &[&str]) -> Result<Vec<PathBuf>, ScanError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_candidate(p, accepted))
        .collect();

    files.sort();
    Ok(files)
}

fn is_candidate(path: &Path, accepted: &[&str]) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    if hidden || !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    accepted.contains(&ext.as_str())
}

fn build_entry(path: PathBuf, order: OrderMode) -> Result<ImageEntry, ScanError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = naming::dotted_extension(&path);

    let key = match order {
        OrderMode::Filename => OrderingKey::Name {
            name: file_name.clone(),
        },
        OrderMode::CaptureTime => {
            metadata::timestamp_key(&path).map_err(|source| ScanError::Timestamp {
                path: path.clone(),
                source,
            })?
        }
    };

    Ok(ImageEntry {
        path,
        file_name,
        extension,
        key,
    })
}
