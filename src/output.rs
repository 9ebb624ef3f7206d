//! Terminal output.
//!
//! All user-facing printing goes through [`OutputFormatter`] so that styling
//! stays consistent. Diagnostics for developers go through the `log` macros instead.

use crate::file_category::Category;
use crate::file_organizer::{OrganizeReport, PlannedAction};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Prints styled messages, progress and run summaries.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// ```no_run
    /// use clean_folder::output::OutputFormatter;
    /// OutputFormatter::success("Folder organized");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message to stderr in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a bold section header preceded by a blank line.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar over `total` files.
    ///
    /// The bar draws to stderr and stays hidden when stderr is not a terminal.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Prints a table of moved files per category followed by archive and cleanup totals.
    pub fn summary_table(report: &OrganizeReport) {
        Self::header("SUMMARY");

        let rows = summary_rows(report);
        let width = rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));
        for (label, count) in &rows {
            println!(
                "{:<width$} | {} {}",
                label,
                count.to_string().green(),
                plural(*count, "file"),
                width = width
            );
        }
        println!("{}", "-".repeat(width + 10));
        let total = report.total_moved();
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            plural(total, "file"),
            width = width
        );

        if report.archives_extracted > 0 {
            println!(
                "Unpacked {} {} ({} {} to {}/)",
                report.archives_extracted,
                plural(report.archives_extracted, "archive"),
                report.files_extracted,
                plural(report.files_extracted, "file"),
                Category::Archives.dir_name()
            );
        }
        if report.kept > 0 {
            println!(
                "{} {} already in place",
                report.kept,
                plural(report.kept, "file")
            );
        }
        println!(
            "Removed {} empty {}",
            report.directories_removed,
            if report.directories_removed == 1 {
                "directory"
            } else {
                "directories"
            }
        );
    }

    /// Prints the actions of a dry run, with paths shown relative to `root`.
    pub fn plan(root: &Path, actions: &[PlannedAction]) {
        let relative = |path: &Path| {
            path.strip_prefix(root)
                .unwrap_or(path)
                .display()
                .to_string()
        };

        for action in actions {
            match action {
                PlannedAction::Move {
                    source,
                    destination,
                    ..
                } => println!(" - {} → {}", relative(source), relative(destination)),
                PlannedAction::Keep { path, .. } => {
                    println!(" - {} {}", relative(path), "(already in place)".dimmed())
                }
                PlannedAction::Extract { archive, entries } => println!(
                    " - {} → unpack {} {} into {}/",
                    relative(archive),
                    entries,
                    plural(*entries, "file"),
                    Category::Archives.dir_name()
                ),
            }
        }
    }
}

/// One `("Folder (description)", count)` row per category that received files.
fn summary_rows(report: &OrganizeReport) -> Vec<(String, usize)> {
    report
        .moved
        .iter()
        .map(|(category, count)| {
            (
                format!("{} ({})", category.dir_name(), category.description()),
                *count,
            )
        })
        .collect()
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
