//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Looking for images in: /home/me/blog/posts/2025-08-29/images
//! Found 2 image(s).
//! Renaming to temporary names...
//!   Whistler02.jpeg -> __tmprename__01.jpeg
//!   a.jpg -> __tmprename__02.jpg
//! Renaming temporary files to final names...
//!   __tmprename__01.jpeg -> Whistler01.jpeg
//!   __tmprename__02.jpg -> Whistler02.jpeg
//!
//! Generating Markdown file: /home/me/blog/posts/2025-08-29/Whistler.md
//!
//! Done! Summary:
//!   Total images processed: 2
//!   Markdown written to: /home/me/blog/posts/2025-08-29/Whistler.md
//!   Renamed images are in: /home/me/blog/posts/2025-08-29/images
//! ```
//!
//! ## Plan
//!
//! ```text
//! Plan (two-phase, temp prefix __tmprename__)
//! 001 Whistler02.jpeg → Whistler01.jpeg
//! 002 a.jpg → Whistler02.jpeg
//!
//! Markdown: /home/me/blog/posts/2025-08-29/Whistler.md
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` for testability; `print_*`
//! wrappers write to stdout. Format functions are pure, no I/O.

use crate::pipeline::{PipelineEvent, Prepared, RunReport};
use crate::rename::{Phase, RenameEvent, Strategy};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 2 spaces per depth level.
fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

// ============================================================================
// Build progress
// ============================================================================

/// Format one pipeline progress event as output lines.
pub fn format_pipeline_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        PipelineEvent::Located { path, detected } => {
            let mut lines = Vec::new();
            if *detected {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                lines.push(format!("Note: using detected folder: {name}"));
            }
            lines.push(format!("Looking for images in: {}", path.display()));
            lines
        }
        PipelineEvent::Found { count } => vec![format!("Found {count} image(s).")],
        PipelineEvent::Rename(event) => format_rename_event(event),
        PipelineEvent::WritingGallery { path } => vec![
            String::new(),
            format!("Generating Markdown file: {}", path.display()),
        ],
    }
}

fn format_rename_event(event: &RenameEvent) -> Vec<String> {
    match event {
        RenameEvent::PhaseStarted(Phase::Staging) => {
            vec!["Renaming to temporary names...".to_string()]
        }
        RenameEvent::PhaseStarted(Phase::Finalizing) => {
            vec!["Renaming temporary files to final names...".to_string()]
        }
        RenameEvent::PhaseStarted(Phase::Direct) => {
            vec!["Renaming to final names...".to_string()]
        }
        RenameEvent::Renamed { from, to, .. } => {
            vec![format!("{}{} -> {}", indent(1), from, to)]
        }
        RenameEvent::Unchanged { name } => {
            vec![format!("{}{} (unchanged)", indent(1), name)]
        }
    }
}

/// Format the closing summary of a successful build.
pub fn format_summary(report: &RunReport) -> Vec<String> {
    vec![
        String::new(),
        "Done! Summary:".to_string(),
        format!("{}Total images processed: {}", indent(1), report.filenames.len()),
        format!(
            "{}Markdown written to: {}",
            indent(1),
            report.gallery_path.display()
        ),
        format!(
            "{}Renamed images are in: {}",
            indent(1),
            report.images.path.display()
        ),
    ]
}

// ============================================================================
// Plan preview
// ============================================================================

/// Format a prepared run: every rename step and the document path.
pub fn format_plan(prepared: &Prepared) -> Vec<String> {
    let plan = &prepared.plan;
    let strategy = match plan.strategy {
        Strategy::Direct => "direct",
        Strategy::TwoPhase => "two-phase",
    };

    let mut lines = vec![format!(
        "Plan ({strategy}, temp prefix {})",
        plan.temp_prefix
    )];
    for step in &plan.steps {
        if step.is_unchanged() {
            lines.push(format!(
                "{} {} (unchanged)",
                format_index(step.index),
                step.source
            ));
        } else {
            lines.push(format!(
                "{} {} → {}",
                format_index(step.index),
                step.source,
                step.target
            ));
        }
    }
    lines.push(String::new());
    lines.push(format!("Markdown: {}", prepared.gallery_path.display()));
    lines
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Format a directory listing under a heading, one indented name per line.
pub fn format_listing(heading: &str, names: &[String]) -> Vec<String> {
    let mut lines = vec![heading.to_string()];
    lines.extend(names.iter().map(|n| format!("{}{}", indent(2), n)));
    lines
}

// ============================================================================
// Print wrappers
// ============================================================================

pub fn print_pipeline_event(event: &PipelineEvent) {
    for line in format_pipeline_event(event) {
        println!("{}", line);
    }
}

pub fn print_summary(report: &RunReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}

pub fn print_plan(prepared: &Prepared) {
    for line in format_plan(prepared) {
        println!("{}", line);
    }
}

/// Print the contents of `dir` under `heading`; unreadable directories print nothing.
pub fn print_listing(heading: &str, dir: &Path) {
    if let Ok(names) = crate::locate::list_dir(dir) {
        for line in format_listing(heading, &names) {
            println!("{}", line);
        }
    }
}
