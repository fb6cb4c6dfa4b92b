//! Markdown gallery document.
//!
//! One image block per renamed file, in sequence order:
//!
//! ```markdown
//! ![Whistler](images/Whistler01.jpeg){group="Whistler"}
//!
//! ![Whistler](images/Whistler02.jpeg){group="Whistler"}
//!
//! ```
//!
//! The `{group="…"}` attribute lets the blog's lightbox page through all
//! images of the post as one set. The document is regenerated from scratch
//! on every run; nothing from a previous version is kept.

use crate::config::{CaptionStyle, GalleryConfig, MarkdownPlacement};
use crate::naming;
use std::fs;
use std::path::{Path, PathBuf};

/// One `![label](link){group="group"}` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryBlock {
    pub label: String,
    pub link: String,
    pub group: String,
}

impl GalleryBlock {
    pub fn to_markdown(&self) -> String {
        format!(
            "![{}]({}){{group=\"{}\"}}",
            self.label, self.link, self.group
        )
    }
}

/// Ordered blocks making up the gallery document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryDocument {
    pub blocks: Vec<GalleryBlock>,
}

impl GalleryDocument {
    /// Build blocks for final file names, keeping their order.
    pub fn from_filenames(filenames: &[String], config: &GalleryConfig) -> Self {
        let group = naming::display_label(&config.base_name);
        let blocks = filenames
            .iter()
            .map(|name| {
                let label = match config.caption {
                    CaptionStyle::BaseName => group.clone(),
                    CaptionStyle::Stem => Path::new(name)
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_else(|| name.clone()),
                };
                GalleryBlock {
                    label,
                    link: format!("{}/{}", config.link_dir.trim_end_matches('/'), name),
                    group: group.clone(),
                }
            })
            .collect();
        Self { blocks }
    }

    /// Render the document: each block followed by a blank line.
    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(|b| format!("{}\n\n", b.to_markdown()))
            .collect()
    }

    /// Write the document to `path`, replacing any previous content.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.render())
    }
}

/// Where the gallery document goes for a post.
pub fn gallery_path(base: &Path, images_dir: &Path, config: &GalleryConfig) -> PathBuf {
    let dir = match config.markdown {
        MarkdownPlacement::BesideBase => base,
        MarkdownPlacement::InImages => images_dir,
    };
    dir.join(config.markdown_file_name())
}
