//! Shared test utilities for the seq-gal test suite.
//!
//! Provides fixture builders for post directories and synthetic image files
//! carrying an EXIF `DateTimeOriginal`, plus small directory inspectors.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = post_with_images(&["b.png", "a.jpg"]);
//! let images = tmp.path().join("images");
//! write_jpeg_taken_at(&images.join("c.jpg"), "2025:08:29 10:15:00");
//! assert_eq!(dir_names(&images), vec!["a.jpg", "b.png", "c.jpg"]);
//! ```

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a post directory with an `images/` subdirectory holding placeholder files.
pub fn post_with_images(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let images = tmp.path().join("images");
    fs::create_dir_all(&images).unwrap();
    for name in names {
        fs::write(images.join(name), format!("fake image {name}")).unwrap();
    }
    tmp
}

/// Set a file's modification time to `secs` after the Unix epoch.
pub fn set_mtime(path: &Path, secs: u64) {
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

/// Sorted file names in a directory.
pub fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

// =========================================================================
// Synthetic EXIF images
// =========================================================================

/// Build a TIFF stream with IFD0 → Exif IFD → `DateTimeOriginal`.
///
/// Layout: header (8) | IFD0 at 8 (18) | Exif IFD at 26 (18) | value at 44 (20).
pub fn exif_tiff(stamp: &str, big_endian: bool) -> Vec<u8> {
    let u16b = |v: u16| {
        if big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    };
    let u32b = |v: u32| {
        if big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    };

    let mut value = stamp.as_bytes().to_vec();
    value.push(0);

    let mut out = Vec::new();
    out.extend_from_slice(if big_endian { b"MM" } else { b"II" });
    out.extend_from_slice(&u16b(42));
    out.extend_from_slice(&u32b(8));
    // IFD0: one entry, ExifIFDPointer (LONG) → 26
    out.extend_from_slice(&u16b(1));
    out.extend_from_slice(&u16b(0x8769));
    out.extend_from_slice(&u16b(4));
    out.extend_from_slice(&u32b(1));
    out.extend_from_slice(&u32b(26));
    out.extend_from_slice(&u32b(0));
    // Exif IFD: one entry, DateTimeOriginal (ASCII) → 44
    out.extend_from_slice(&u16b(1));
    out.extend_from_slice(&u16b(0x9003));
    out.extend_from_slice(&u16b(2));
    out.extend_from_slice(&u32b(value.len() as u32));
    out.extend_from_slice(&u32b(44));
    out.extend_from_slice(&u32b(0));
    out.extend_from_slice(&value);
    out
}

/// Wrap a TIFF stream in a minimal JPEG: SOI, APP1 `Exif`, EOI.
pub fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    // APP0 JFIF segment first, as real cameras often write
    out.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x07]);
    out.extend_from_slice(b"JFIF\0");
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// Wrap a TIFF stream in a minimal PNG: signature, IHDR, eXIf, IEND.
pub fn png_with_exif(tiff: &[u8]) -> Vec<u8> {
    fn chunk(out: &mut Vec<u8>, kind: &[u8; 4], body: &[u8]) {
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        out.extend_from_slice(kind);
        out.extend_from_slice(body);
        // CRC is not checked by the reader
        out.extend_from_slice(&[0, 0, 0, 0]);
    }
    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();
    chunk(&mut out, b"IHDR", &[0; 13]);
    chunk(&mut out, b"eXIf", tiff);
    chunk(&mut out, b"IEND", &[]);
    out
}

/// Wrap a TIFF stream in a minimal WebP RIFF container with an `EXIF` chunk.
pub fn webp_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut body = b"WEBP".to_vec();
    body.extend_from_slice(b"VP8X");
    body.extend_from_slice(&10u32.to_le_bytes());
    body.extend_from_slice(&[0; 10]);
    body.extend_from_slice(b"EXIF");
    body.extend_from_slice(&(tiff.len() as u32).to_le_bytes());
    body.extend_from_slice(tiff);
    if tiff.len() % 2 == 1 {
        body.push(0);
    }
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}

/// Write a JPEG whose EXIF says it was taken at `stamp` (`YYYY:MM:DD HH:MM:SS`).
pub fn write_jpeg_taken_at(path: &Path, stamp: &str) {
    fs::write(path, jpeg_with_exif(&exif_tiff(stamp, false))).unwrap();
}
