//! Command-line interface for clean-folder.
//!
//! This module handles:
//! - Argument definitions (clap)
//! - Loading the optional filter configuration
//! - Running or simulating the organization and reporting the outcome

use crate::config::FilterConfig;
use crate::file_organizer::Organizer;
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "clean-folder",
    version,
    about = "Sort a folder into category subfolders, transliterate file names and unpack zip archives"
)]
pub struct Cli {
    /// Folder to organize
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub path: PathBuf,

    /// Only print what would be done without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// TOML file with filter rules
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print debug logs
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The command selected by the parsed flags.
    pub fn organize_command(&self) -> OrganizeCommand {
        OrganizeCommand::Organize {
            dry_run: self.dry_run,
        }
    }
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeCommand {
    /// Organize files in a directory.
    Organize {
        /// If true, simulate the operation without making changes.
        dry_run: bool,
    },
}

/// Runs `command` on `dir_path` without a filter configuration.
///
/// # Examples
///
/// ```no_run
/// use clean_folder::cli::{run_cli, OrganizeCommand};
/// use std::path::Path;
///
/// match run_cli(OrganizeCommand::Organize { dry_run: false }, Path::new("/home/me/Downloads")) {
///     Ok(()) => println!("done"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(command: OrganizeCommand, dir_path: &Path) -> Result<(), String> {
    run_cli_with_config(command, dir_path, None)
}

/// Runs `command` on `dir_path`, applying filters from `config_path` if given.
///
/// Errors are returned as user-facing messages.
pub fn run_cli_with_config(
    command: OrganizeCommand,
    dir_path: &Path,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let organizer = Organizer::new(dir_path).map_err(|e| e.to_string())?;

    let organizer = match config_path {
        Some(path) => {
            let filters = FilterConfig::load(Some(path))
                .and_then(FilterConfig::compile)
                .map_err(|e| format!("Error loading configuration: {}", e))?;
            organizer.with_filters(filters)
        }
        None => organizer,
    };

    match command {
        OrganizeCommand::Organize { dry_run: true } => organize_dry_run(&organizer),
        OrganizeCommand::Organize { dry_run: false } => organize(&organizer),
    }
}

/// Organizes the folder, showing a progress bar and a summary table.
fn organize(organizer: &Organizer) -> Result<(), String> {
    OutputFormatter::info(&format!("Organizing {}", organizer.root().display()));

    let pb = OutputFormatter::create_progress_bar(0);
    let result = organizer.organize_with_progress(|path, total| {
        pb.set_length(total as u64);
        if let Some(name) = path.file_name() {
            pb.set_message(name.to_string_lossy().to_string());
        }
        pb.inc(1);
    });
    pb.finish_and_clear();

    let report = result.map_err(|e| e.to_string())?;
    OutputFormatter::summary_table(&report);
    Ok(())
}

/// Prints the plan for the folder without modifying anything.
fn organize_dry_run(organizer: &Organizer) -> Result<(), String> {
    OutputFormatter::dry_run_notice(&format!(
        "Analyzing {}",
        organizer.root().display()
    ));

    let actions = organizer.plan().map_err(|e| e.to_string())?;
    if actions.is_empty() {
        OutputFormatter::info("No files found to organize.");
        return Ok(());
    }

    OutputFormatter::header("Planned changes");
    OutputFormatter::plan(organizer.root(), &actions);
    OutputFormatter::dry_run_notice(&format!(
        "{} files analyzed, nothing was modified. Empty folders would be removed afterwards.",
        actions.len()
    ));
    Ok(())
}
