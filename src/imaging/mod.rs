//! Image file inspection, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Container detection** | `image::ImageFormat::from_path` |
//! | **EXIF capture time** | custom parser (JPEG APP1, PNG eXIf, WebP EXIF, TIFF IFD) |
//!
//! Image content is never decoded: only the bytes needed to locate the EXIF
//! block are inspected.

pub(crate) mod exif_parser;
