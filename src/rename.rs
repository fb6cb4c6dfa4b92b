//! Collision-safe renaming into the numbered sequence.
//!
//! Renaming happens in two steps: a pure planning step that computes every
//! name up front, and an execution step that touches the file system.
//!
//! ## Planning
//!
//! For N ordered images, step `i` (1-based) gets:
//!
//! - a **target** name `{base_name}{i:0w}{ext}` with `w = max(2, digits(N))`,
//! - a **temp** name `{temp_prefix}{i:0w}{source_ext}`.
//!
//! Temp names never equal any existing directory entry or any target. If the
//! configured prefix would clash (a leftover from an interrupted run, say),
//! a counter is appended to it until it does not. Name comparisons are
//! case-insensitive so the guarantee also holds on case-insensitive file
//! systems.
//!
//! A target that equals a directory entry outside the plan is refused
//! ([`RenameError::TargetOccupied`]): `rename` would silently replace it.
//!
//! ## Execution strategies
//!
//! - [`Strategy::TwoPhase`]: every source is moved to its temp name, then
//!   every temp file to its target. Required when some target equals the
//!   original name of a *different* source (re-running after adding a photo,
//!   or when the order changed).
//! - [`Strategy::Direct`]: when no target equals another source's name,
//!   each file is renamed once. Files already carrying their target name are
//!   left alone, which makes a re-run on unchanged output a no-op.
//!
//! A failed rename aborts immediately and reports the file at fault. There is
//! no rollback.

use crate::config::GalleryConfig;
use crate::naming;
use crate::types::ImageEntry;
use serde::Serialize;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("target name {name} is already taken by a file that is not being renamed")]
    TargetOccupied { name: String },
    #[error("failed to rename {} -> {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// How a plan is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Direct,
    TwoPhase,
}

/// One file's journey through the rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameStep {
    /// 1-based sequence index.
    pub index: usize,
    /// Current name, for display. Lossy for names that are not UTF-8.
    pub source: String,
    /// Current location on disk.
    #[serde(skip)]
    pub source_path: PathBuf,
    pub temp: String,
    pub target: String,
}

impl RenameStep {
    /// True when the file already carries its target name.
    pub fn is_unchanged(&self) -> bool {
        self.source_path.file_name() == Some(OsStr::new(&self.target))
    }
}

/// Full set of renames for one directory, in sequence order.
#[derive(Debug, Clone, Serialize)]
pub struct RenamePlan {
    pub dir: PathBuf,
    pub width: usize,
    pub temp_prefix: String,
    pub strategy: Strategy,
    pub steps: Vec<RenameStep>,
}

impl RenamePlan {
    /// Target names in sequence order.
    pub fn targets(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.target.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Phase of an executing plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Sources → temp names.
    Staging,
    /// Temp names → targets.
    Finalizing,
    /// Sources → targets in one pass.
    Direct,
}

/// Progress notification emitted while a plan executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameEvent {
    PhaseStarted(Phase),
    Renamed {
        phase: Phase,
        from: String,
        to: String,
    },
    Unchanged {
        name: String,
    },
}

/// Compute the rename plan for ordered entries living in `dir`.
pub fn plan_renames(
    dir: &Path,
    entries: &[ImageEntry],
    config: &GalleryConfig,
) -> Result<RenamePlan, RenameError> {
    let width = naming::pad_width(entries.len());
    let targets: Vec<String> = (1..=entries.len())
        .map(|i| naming::sequence_name(&config.base_name, i, width, &config.extension))
        .collect();

    let existing: HashSet<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| fold(&e.file_name().to_string_lossy()))
        .collect();
    let sources: Vec<String> = entries.iter().map(|e| fold(&e.file_name)).collect();
    let source_set: HashSet<&str> = sources.iter().map(String::as_str).collect();

    if let Some(name) = targets.iter().find(|t| {
        let folded = fold(t);
        existing.contains(&folded) && !source_set.contains(folded.as_str())
    }) {
        return Err(RenameError::TargetOccupied { name: name.clone() });
    }

    let mut reserved: HashSet<String> = existing;
    reserved.extend(targets.iter().map(|t| fold(t)));
    let temp_prefix = choose_temp_prefix(&config.temp_prefix, entries, width, &reserved);

    // Direct renames are safe when no target is another file's current name
    let crosses = targets
        .iter()
        .enumerate()
        .any(|(i, t)| {
            let folded = fold(t);
            sources
                .iter()
                .enumerate()
                .any(|(j, s)| j != i && *s == folded)
        });
    let strategy = if crosses {
        Strategy::TwoPhase
    } else {
        Strategy::Direct
    };

    let steps = entries
        .iter()
        .zip(targets)
        .enumerate()
        .map(|(i, (entry, target))| RenameStep {
            index: i + 1,
            source: entry.file_name.clone(),
            source_path: entry.path.clone(),
            temp: naming::temp_name(&temp_prefix, i + 1, width, &entry.extension),
            target,
        })
        .collect();

    Ok(RenamePlan {
        dir: dir.to_path_buf(),
        width,
        temp_prefix,
        strategy,
        steps,
    })
}

/// Pick the first prefix whose temp names clash with nothing in `reserved`.
///
/// Tries `prefix`, then `{prefix}1_`, `{prefix}2_`, … A free prefix always
/// exists because `reserved` is finite.
fn choose_temp_prefix(
    prefix: &str,
    entries: &[ImageEntry],
    width: usize,
    reserved: &HashSet<String>,
) -> String {
    let is_free = |candidate: &str| {
        entries.iter().enumerate().all(|(i, e)| {
            let temp = naming::temp_name(candidate, i + 1, width, &e.extension);
            !reserved.contains(&fold(&temp))
        })
    };
    if is_free(prefix) {
        return prefix.to_string();
    }
    (1..)
        .map(|n| format!("{prefix}{n}_"))
        .find(|candidate| is_free(candidate.as_str()))
        .unwrap_or_else(|| prefix.to_string())
}

/// Case-folded name used for collision checks.
fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Carry out a plan, reporting progress through `on_event`.
///
/// Returns the final file names in sequence order.
pub fn execute_plan(
    plan: &RenamePlan,
    mut on_event: impl FnMut(RenameEvent),
) -> Result<Vec<String>, RenameError> {
    match plan.strategy {
        Strategy::TwoPhase => {
            on_event(RenameEvent::PhaseStarted(Phase::Staging));
            for step in &plan.steps {
                rename_in(step.source_path.clone(), plan.dir.join(&step.temp))?;
                on_event(RenameEvent::Renamed {
                    phase: Phase::Staging,
                    from: step.source.clone(),
                    to: step.temp.clone(),
                });
            }
            on_event(RenameEvent::PhaseStarted(Phase::Finalizing));
            for step in &plan.steps {
                rename_in(plan.dir.join(&step.temp), plan.dir.join(&step.target))?;
                on_event(RenameEvent::Renamed {
                    phase: Phase::Finalizing,
                    from: step.temp.clone(),
                    to: step.target.clone(),
                });
            }
        }
        Strategy::Direct => {
            on_event(RenameEvent::PhaseStarted(Phase::Direct));
            for step in &plan.steps {
                if step.is_unchanged() {
                    on_event(RenameEvent::Unchanged {
                        name: step.source.clone(),
                    });
                    continue;
                }
                rename_in(step.source_path.clone(), plan.dir.join(&step.target))?;
                on_event(RenameEvent::Renamed {
                    phase: Phase::Direct,
                    from: step.source.clone(),
                    to: step.target.clone(),
                });
            }
        }
    }
    Ok(plan.targets())
}

fn rename_in(from: PathBuf, to: PathBuf) -> Result<(), RenameError> {
    fs::rename(&from, &to).map_err(|source| RenameError::Rename { from, to, source })
}
