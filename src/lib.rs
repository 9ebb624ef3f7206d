//! clean-folder - sort a messy folder into category subfolders
//!
//! This library classifies files by extension, moves them into category
//! directories under transliterated and sanitized names, unpacks zip archives
//! and removes directories left empty by the run.

pub mod archive;
pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod transliterate;

pub use archive::extract_archive;
pub use config::{CompiledFilters, ConfigError, FilterConfig};
pub use file_category::{Category, classify};
pub use file_organizer::{OrganizeError, OrganizeReport, Organizer, PlannedAction};
pub use transliterate::normalize;

pub use cli::{Cli, OrganizeCommand, run_cli};
