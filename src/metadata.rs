//! Capture time resolution for ordering.
//!
//! Each image's timestamp comes from the first source that yields a value:
//!
//! - **EXIF `DateTimeOriginal`**: the moment the shutter fired, as recorded
//!   by the camera. Survives copies, exports and re-downloads.
//! - **File modification time**: always available, but reflects the last
//!   time the file was written rather than when the photo was taken.
//!
//! Missing, unreadable, or malformed EXIF data is not an error. It simply
//! falls through to the modification time.
//!
//! EXIF timestamps carry no time zone, so modification times are converted
//! to local naive time to make the two sources comparable.

use crate::imaging::exif_parser;
use crate::types::{OrderingKey, TimestampSource};
use chrono::{DateTime, Local, NaiveDateTime};
use std::path::Path;

/// EXIF date format: `2025:08:29 10:15:00`.
const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Parse an EXIF `DateTimeOriginal` string.
///
/// Returns `None` for placeholders cameras write when the clock was never
/// set (`0000:00:00 00:00:00`) and for any other malformed value.
pub fn parse_exif_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), EXIF_DATE_FORMAT).ok()
}

/// Capture time from embedded EXIF, if present and parseable.
pub fn capture_time(path: &Path) -> Option<NaiveDateTime> {
    exif_parser::read_date_time_original(path).and_then(|raw| parse_exif_timestamp(&raw))
}

/// Last-modified time of a file as local naive time.
pub fn modified_time(path: &Path) -> std::io::Result<NaiveDateTime> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}

/// Resolve the timestamp ordering key: EXIF capture time → modification time.
pub fn timestamp_key(path: &Path) -> std::io::Result<OrderingKey> {
    if let Some(at) = capture_time(path) {
        return Ok(OrderingKey::Timestamp {
            at,
            source: TimestampSource::Exif,
        });
    }
    Ok(OrderingKey::Timestamp {
        at: modified_time(path)?,
        source: TimestampSource::Modified,
    })
}
