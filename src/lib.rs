//! # seq-gal
//!
//! Numbers a blog post's photos and writes a Markdown gallery for them.
//! The post directory is the data source: its images directory holds the
//! photos, an optional `gallery.toml` holds the settings, and the generated
//! `{base_name}.md` is included by the post.
//!
//! # Architecture: One-Shot Pipeline
//!
//! ```text
//! 1. Locate   post/          →  images directory   (configured name or keyword match)
//! 2. Scan     images/        →  ordered entries    (EXIF capture time / mtime / name)
//! 3. Rename   entries        →  Photo01.jpeg …     (planned first, then executed)
//! 4. Gallery  final names    →  Photo.md           (one image block per file)
//! ```
//!
//! Nothing is carried between runs except the renamed files and the
//! document. Every stage takes the same explicit [`config::GalleryConfig`]
//! record.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `gallery.toml` loading, merging over stock defaults, validation |
//! | [`locate`] | Images directory resolution |
//! | [`scan`] | Candidate collection and ordering |
//! | [`metadata`] | Capture time resolution: EXIF, then modification time |
//! | [`imaging`] | Container detection and the EXIF byte parser |
//! | [`rename`] | Rename planning and two-phase / direct execution |
//! | [`gallery`] | Markdown gallery document |
//! | [`pipeline`] | End-to-end run and its error type |
//! | [`naming`] | Sequence name, temp name and label helpers |
//! | [`types`] | Shared entry and ordering key types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Plan Before Touching Anything
//!
//! Every name is computed before the first rename. The plan can be shown
//! (`seq-gal plan`) and checked for clashes with unrelated files up front,
//! so the only failures left during execution are the file system's own.
//!
//! ## Two-Phase Only When Needed
//!
//! Moving every file through a temporary name is the safe default when a new
//! name equals another file's current name. When the new names are disjoint
//! from the current ones, files are renamed once, and files already carrying
//! their final name are not touched at all.
//!
//! ## No Image Decoding
//!
//! Ordering needs one EXIF field. The [`imaging`] module walks just enough
//! of the container to find it; pixels are never decoded and the final
//! extension change does not re-encode anything.

pub mod config;
pub mod gallery;
pub mod imaging;
pub mod locate;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod rename;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
