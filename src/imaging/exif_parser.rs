//! Minimal EXIF reader for the capture timestamp.
//!
//! Extracts a single field: `DateTimeOriginal` (tag 0x9003) from the Exif
//! sub-IFD, stored as ASCII `YYYY:MM:DD HH:MM:SS`.
//!
//! The EXIF block is a TIFF stream embedded in the image container:
//! - JPEG: APP1 marker (0xFFE1) starting with `Exif\0\0`.
//! - PNG: `eXIf` chunk.
//! - WebP: `EXIF` chunk inside the RIFF container.
//! - TIFF: the file itself.
//!
//! Zero external dependencies beyond format detection. Every read is
//! bounds-checked; malformed data yields `None`, never a panic.

use image::ImageFormat;
use std::path::Path;

const EXIF_HEADER: &[u8] = b"Exif\0\0";
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

/// Read the raw `DateTimeOriginal` string from an image file.
///
/// The container is recognized from the file's leading bytes, falling back
/// to the extension when they match no known signature. Returns `None` when
/// the file cannot be read, has no EXIF block, or the block lacks the tag.
pub fn read_date_time_original(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    let format = image::guess_format(&bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .ok()?;
    let tiff = match format {
        ImageFormat::Jpeg => find_jpeg_app1_exif(&bytes)?,
        ImageFormat::Png => find_png_exif_chunk(&bytes)?,
        ImageFormat::WebP => find_webp_exif_chunk(&bytes)?,
        ImageFormat::Tiff => &bytes[..],
        _ => return None,
    };
    date_time_original_from_tiff(tiff)
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

/// Find the TIFF stream inside a JPEG's `Exif` APP1 segment.
fn find_jpeg_app1_exif(data: &[u8]) -> Option<&[u8]> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        let marker = data[pos + 1];
        // Fill bytes
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        // SOS (0xDA) means image data starts; EOI ends the file
        if marker == 0xDA || marker == 0xD9 {
            break;
        }
        // Markers without length field
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }

        let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if seg_len < 2 {
            return None;
        }
        let seg_start = pos + 4;
        let seg_end = (pos + 2 + seg_len).min(data.len());
        if marker == 0xE1 {
            let segment = &data[seg_start..seg_end];
            if let Some(tiff) = segment.strip_prefix(EXIF_HEADER) {
                return Some(tiff);
            }
        }
        pos += 2 + seg_len;
    }
    None
}

/// Find the payload of a PNG `eXIf` chunk.
///
/// Chunk layout: length (u32 BE) + type (4) + data + CRC (4).
fn find_png_exif_chunk(data: &[u8]) -> Option<&[u8]> {
    let mut pos = PNG_SIGNATURE.len();
    if !data.starts_with(PNG_SIGNATURE) {
        return None;
    }
    while pos + 8 <= data.len() {
        let len = u32::from_be_bytes(data[pos..pos + 4].try_into().ok()?) as usize;
        let kind = &data[pos + 4..pos + 8];
        let body_start = pos + 8;
        let body = data.get(body_start..body_start.checked_add(len)?)?;
        match kind {
            b"eXIf" => return Some(body.strip_prefix(EXIF_HEADER).unwrap_or(body)),
            b"IEND" => break,
            _ => {}
        }
        pos = body_start + len + 4;
    }
    None
}

/// Find the payload of a WebP `EXIF` chunk.
///
/// RIFF layout: `RIFF` + size (u32 LE) + `WEBP`, then chunks of
/// fourcc (4) + size (u32 LE) + data, padded to even length.
fn find_webp_exif_chunk(data: &[u8]) -> Option<&[u8]> {
    if data.len() < 12 || &data[0..4] != b"RIFF" || &data[8..12] != b"WEBP" {
        return None;
    }
    let mut pos = 12;
    while pos + 8 <= data.len() {
        let fourcc = &data[pos..pos + 4];
        let len = u32::from_le_bytes(data[pos + 4..pos + 8].try_into().ok()?) as usize;
        let body_start = pos + 8;
        let body = data.get(body_start..body_start.checked_add(len)?)?;
        if fourcc == b"EXIF" {
            return Some(body.strip_prefix(EXIF_HEADER).unwrap_or(body));
        }
        pos = body_start + len + (len % 2);
    }
    None
}

// ---------------------------------------------------------------------------
// TIFF structure
// ---------------------------------------------------------------------------

/// Byte-order aware, bounds-checked view over a TIFF stream.
struct Tiff<'a> {
    data: &'a [u8],
    big_endian: bool,
}

impl<'a> Tiff<'a> {
    fn new(data: &'a [u8]) -> Option<Self> {
        let big_endian = match data.get(0..2)? {
            b"MM" => true,
            b"II" => false,
            _ => return None,
        };
        let tiff = Self { data, big_endian };
        // Verify TIFF magic (42)
        (tiff.u16_at(2)? == 42).then_some(tiff)
    }

    fn u16_at(&self, offset: usize) -> Option<u16> {
        let bytes: [u8; 2] = self.data.get(offset..offset + 2)?.try_into().ok()?;
        Some(if self.big_endian {
            u16::from_be_bytes(bytes)
        } else {
            u16::from_le_bytes(bytes)
        })
    }

    fn u32_at(&self, offset: usize) -> Option<u32> {
        let bytes: [u8; 4] = self.data.get(offset..offset + 4)?.try_into().ok()?;
        Some(if self.big_endian {
            u32::from_be_bytes(bytes)
        } else {
            u32::from_le_bytes(bytes)
        })
    }

    fn first_ifd(&self) -> Option<usize> {
        self.u32_at(4).map(|o| o as usize)
    }

    /// Find the 12-byte entry for `tag` in the IFD at `ifd_offset`.
    fn find_entry(&self, ifd_offset: usize, tag: u16) -> Option<usize> {
        let entry_count = self.u16_at(ifd_offset)? as usize;
        let entries_start = ifd_offset + 2;
        (0..entry_count)
            .map(|i| entries_start + i * 12)
            .take_while(|&entry| entry + 12 <= self.data.len())
            .find(|&entry| self.u16_at(entry) == Some(tag))
    }

    /// Read an ASCII (type 2) entry's value, trimmed of NULs and whitespace.
    fn ascii_value(&self, entry: usize) -> Option<String> {
        if self.u16_at(entry + 2)? != 2 {
            return None;
        }
        let count = self.u32_at(entry + 4)? as usize;
        // Values of 4 bytes or fewer are stored inline in the offset field
        let start = if count <= 4 {
            entry + 8
        } else {
            self.u32_at(entry + 8)? as usize
        };
        let raw = self.data.get(start..start.checked_add(count)?)?;
        let text = String::from_utf8_lossy(raw);
        let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Walk IFD0 → Exif sub-IFD → `DateTimeOriginal`.
fn date_time_original_from_tiff(data: &[u8]) -> Option<String> {
    let tiff = Tiff::new(data)?;
    let ifd0 = tiff.first_ifd()?;
    let pointer_entry = tiff.find_entry(ifd0, TAG_EXIF_IFD_POINTER)?;
    let exif_ifd = tiff.u32_at(pointer_entry + 8)? as usize;
    let entry = tiff.find_entry(exif_ifd, TAG_DATE_TIME_ORIGINAL)?;
    tiff.ascii_value(entry)
}
