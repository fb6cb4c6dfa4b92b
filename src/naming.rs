//! Sequence naming convention shared by the renamer and the gallery emitter.
//!
//! Every renamed image follows `{base_name}{index}{ext}` where the index is
//! 1-based and zero-padded to a width that fits the whole run:
//!
//! - 7 images → `Whistler01.jpeg` … `Whistler07.jpeg` (minimum width 2)
//! - 120 images → `Whistler001.jpeg` … `Whistler120.jpeg`
//!
//! Temporary names used during a two-phase rename follow the same pattern
//! with a reserved prefix and the source file's own (lowercased) extension:
//! `__tmprename__01.jpg`.

use std::path::Path;

/// Minimum number of digits in a sequence index.
const MIN_WIDTH: usize = 2;

/// Number of digits needed to number `count` files, never less than 2.
///
/// - `pad_width(0)` → 2
/// - `pad_width(9)` → 2
/// - `pad_width(100)` → 3
pub fn pad_width(count: usize) -> usize {
    count.to_string().len().max(MIN_WIDTH)
}

/// Final name for the image at 1-based `index`.
pub fn sequence_name(base_name: &str, index: usize, width: usize, ext: &str) -> String {
    format!("{base_name}{index:0width$}{ext}")
}

/// Intermediate name for the image at 1-based `index` during a two-phase rename.
pub fn temp_name(prefix: &str, index: usize, width: usize, source_ext: &str) -> String {
    format!("{prefix}{index:0width$}{source_ext}")
}

/// Ensure an extension starts with a dot: `"jpeg"` → `".jpeg"`.
pub fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

/// Lowercased extension of a path including the leading dot, or empty.
///
/// `IMG_0042.JPG` → `".jpg"`, `README` → `""`.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Display label for a base name: first character uppercased, the rest lowercased.
///
/// `whistler` → `Whistler`, `NEW york` → `New york`.
pub fn display_label(base_name: &str) -> String {
    let mut chars = base_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
