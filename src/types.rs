//! Shared types passed between the scan, rename and output stages.

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::path::PathBuf;

/// Where a timestamp ordering key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    /// EXIF `DateTimeOriginal`.
    Exif,
    /// File modification time (metadata missing or unreadable).
    Modified,
}

/// Value an image is sorted by before numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderingKey {
    Timestamp {
        at: NaiveDateTime,
        source: TimestampSource,
    },
    Name {
        name: String,
    },
}

impl OrderingKey {
    /// Compare two keys for sorting.
    ///
    /// Timestamps compare by time regardless of their source; names compare
    /// byte-wise (case-sensitive). A run never mixes the two kinds, but when
    /// it happens timestamps sort first.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Timestamp { at: a, .. }, Self::Timestamp { at: b, .. }) => a.cmp(b),
            (Self::Name { name: a }, Self::Name { name: b }) => a.cmp(b),
            (Self::Timestamp { .. }, Self::Name { .. }) => Ordering::Less,
            (Self::Name { .. }, Self::Timestamp { .. }) => Ordering::Greater,
        }
    }
}

/// A source image discovered in the images directory.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub file_name: String,
    /// Lowercased extension with leading dot (`.jpg`).
    pub extension: String,
    pub key: OrderingKey,
}
