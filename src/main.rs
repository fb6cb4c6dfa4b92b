use clap::{Parser, Subcommand};
use seq_gal::pipeline::{self, PipelineError};
use seq_gal::{config, locate::LocateError, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "seq-gal")]
#[command(about = "Number a post's photos and write a Markdown gallery")]
#[command(long_about = "\
Number a post's photos and write a Markdown gallery

Photos in the post's images directory are ordered by capture time (EXIF,
falling back to modification time) or by file name, renamed to
{base_name}01{ext}, {base_name}02{ext}, ... and listed in {base_name}.md.

Post structure:

  posts/2025-08-29/
  ├── gallery.toml        # Optional config (see gen-config)
  ├── index.qmd
  ├── Whistler.md         # Generated gallery document
  └── images/             # Or any subdirectory named like photos/pics
      ├── Whistler01.jpeg
      └── Whistler02.jpeg

Run 'seq-gal gen-config' to generate a documented gallery.toml.")]
#[command(version)]
struct Cli {
    /// Post directory holding the images directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Base name for images and the Markdown file (overrides gallery.toml)
    #[arg(long, global = true)]
    base_name: Option<String>,

    /// Final image extension (overrides gallery.toml)
    #[arg(long, global = true)]
    ext: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rename the images and write the gallery document
    Build,
    /// Show what build would do without touching any file
    Plan {
        /// Print the rename plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let source = resolve_source(&cli.source);
    let mut gallery_config = config::load_config(&source)?;
    gallery_config.apply_overrides(cli.base_name, cli.ext)?;

    match cli.command {
        Command::Build => {
            let report = pipeline::run(&source, &gallery_config, |event| {
                output::print_pipeline_event(&event)
            })?;
            output::print_summary(&report);
        }
        Command::Plan { json } => {
            let prepared = pipeline::prepare(&source, &gallery_config, |event| {
                if !json {
                    output::print_pipeline_event(&event)
                }
            })?;
            if json {
                println!("{}", pipeline::plan_json(&prepared.plan)?);
            } else {
                output::print_plan(&prepared);
            }
        }
        Command::GenConfig => {}
    }

    Ok(())
}

/// Print the error, plus a directory listing where it helps the operator.
fn report_failure(err: &PipelineError) {
    match err {
        PipelineError::Locate(LocateError::NotFound { base, .. }) => {
            println!("ERROR: {err}.");
            output::print_listing("Directory listing of the post folder:", base);
        }
        PipelineError::Empty { images_dir } => {
            output::print_listing("Files present in the images folder:", images_dir);
        }
        _ => eprintln!("Error: {err}"),
    }
}

/// Absolute form of the post directory, so printed paths are unambiguous.
fn resolve_source(cli_source: &Path) -> PathBuf {
    cli_source
        .canonicalize()
        .unwrap_or_else(|_| cli_source.to_path_buf())
}
