//! End-to-end run: locate → scan → plan → rename → gallery.
//!
//! [`prepare`] does everything that only reads the file system and stops at
//! a [`Prepared`] run (used by `seq-gal plan`). [`run`] carries it out.
//! Progress is reported through [`PipelineEvent`]s so the CLI can print as
//! work happens while the pipeline itself stays free of I/O to stdout.

use crate::config::{ConfigError, GalleryConfig};
use crate::gallery::{self, GalleryDocument};
use crate::locate::{self, ImagesDir, LocateError};
use crate::rename::{self, RenameError, RenameEvent, RenamePlan};
use crate::scan::{self, ScanError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("no images found in {}", images_dir.display())]
    Empty { images_dir: PathBuf },
    #[error(transparent)]
    Rename(#[from] RenameError),
    #[error("failed to write {}: {source}", path.display())]
    Gallery {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot encode plan as JSON: {0}")]
    PlanJson(#[from] serde_json::Error),
}

/// Progress notification from a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Located { path: PathBuf, detected: bool },
    Found { count: usize },
    Rename(RenameEvent),
    WritingGallery { path: PathBuf },
}

/// A run that has been planned but has not touched any file yet.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub images: ImagesDir,
    pub plan: RenamePlan,
    pub gallery_path: PathBuf,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub images: ImagesDir,
    pub plan: RenamePlan,
    pub filenames: Vec<String>,
    pub gallery_path: PathBuf,
}

/// Locate, scan and plan without modifying anything.
///
/// Fails with [`PipelineError::Empty`] when the images directory holds no
/// eligible files.
pub fn prepare(
    base: &Path,
    config: &GalleryConfig,
    mut on_event: impl FnMut(PipelineEvent),
) -> Result<Prepared, PipelineError> {
    let images = locate::locate_images_dir(base, config)?;
    on_event(PipelineEvent::Located {
        path: images.path.clone(),
        detected: images.detected,
    });

    let entries = scan::scan(&images.path, config)?;
    on_event(PipelineEvent::Found {
        count: entries.len(),
    });
    if entries.is_empty() {
        return Err(PipelineError::Empty {
            images_dir: images.path,
        });
    }

    let plan = rename::plan_renames(&images.path, &entries, config)?;
    let gallery_path = gallery::gallery_path(base, &images.path, config);
    Ok(Prepared {
        images,
        plan,
        gallery_path,
    })
}

/// Run the whole pipeline for the post directory `base`.
pub fn run(
    base: &Path,
    config: &GalleryConfig,
    mut on_event: impl FnMut(PipelineEvent),
) -> Result<RunReport, PipelineError> {
    let Prepared {
        images,
        plan,
        gallery_path,
    } = prepare(base, config, &mut on_event)?;

    let filenames = rename::execute_plan(&plan, |e| on_event(PipelineEvent::Rename(e)))?;

    on_event(PipelineEvent::WritingGallery {
        path: gallery_path.clone(),
    });
    GalleryDocument::from_filenames(&filenames, config)
        .write(&gallery_path)
        .map_err(|source| PipelineError::Gallery {
            path: gallery_path.clone(),
            source,
        })?;

    Ok(RunReport {
        images,
        plan,
        filenames,
        gallery_path,
    })
}

/// Pretty-printed JSON form of a plan, as shown by `seq-gal plan --json`.
///
/// Fails when a path in the plan is not valid UTF-8.
pub fn plan_json(plan: &RenamePlan) -> Result<String, PipelineError> {
    Ok(serde_json::to_string_pretty(plan)?)
}
