//! Optional file filtering configuration.
//!
//! A plain run organizes every regular file under the root. A TOML file given
//! with `--config` can hold files back from a run; excluded files stay exactly
//! where they are.
//!
//! ```toml
//! [filters]
//! enable_hidden_files = true
//!
//! [filters.exclude]
//! filenames = ["Thumbs.db", "desktop.ini"]
//! patterns = ["**/projects/**"]
//! extensions = ["part", "crdownload"]
//! regex = ['^~\$']
//!
//! [filters.include]
//! patterns = ["projects/inbox/*"]
//! ```
//!
//! Include patterns win over every exclude rule. Glob patterns are matched
//! against the path relative to the root, regexes against the file name only.

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading or compiling a filter configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The configuration file does not exist.
    ConfigNotFound(PathBuf),
    /// The file is not valid TOML or does not match the expected layout.
    ConfigInvalid(String),
    /// A glob pattern could not be parsed.
    InvalidGlobPattern(String),
    /// A regex could not be compiled.
    InvalidRegexPattern { pattern: String, reason: String },
    /// The configuration file could not be read.
    IoError { path: PathBuf, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid config: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex '{}': {}", pattern, reason)
            }
            ConfigError::IoError { path, reason } => {
                write!(f, "Could not read config {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level layout of a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub filters: FilterRules,
}

/// The `[filters]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRules {
    /// Organize files whose name starts with ".". Defaults to true.
    #[serde(default = "default_enable_hidden_files")]
    pub enable_hidden_files: bool,

    #[serde(default)]
    pub exclude: ExcludeRules,

    #[serde(default)]
    pub include: IncludeRules,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            enable_hidden_files: default_enable_hidden_files(),
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        }
    }
}

fn default_enable_hidden_files() -> bool {
    true
}

/// The `[filters.exclude]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact file names, e.g. "Thumbs.db".
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns over the root-relative path.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Extensions without the dot, compared case-insensitively.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regexes over the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

/// The `[filters.include]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    /// Glob patterns that override every exclude rule.
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl FilterConfig {
    /// Loads the configuration at `config_path`, or the defaults when no path
    /// is given. No other location is searched.
    ///
    /// # Errors
    ///
    /// Returns an error if the given file is missing, unreadable or invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Reads and parses one TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compiles every pattern so that matching does no parsing.
    ///
    /// # Errors
    ///
    /// Returns an error for the first invalid glob or regex.
    pub fn compile(self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(self.filters)
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
        })
        .collect()
}

fn compile_regexes(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Filter rules with every pattern compiled once up front.
pub struct CompiledFilters {
    hidden_files: bool,
    names: HashSet<String>,
    extensions: HashSet<String>,
    excluded_globs: Vec<Pattern>,
    excluded_regexes: Vec<Regex>,
    included_globs: Vec<Pattern>,
}

impl CompiledFilters {
    fn new(rules: FilterRules) -> Result<Self, ConfigError> {
        Ok(Self {
            hidden_files: rules.enable_hidden_files,
            excluded_globs: compile_globs(&rules.exclude.patterns)?,
            excluded_regexes: compile_regexes(&rules.exclude.regex)?,
            included_globs: compile_globs(&rules.include.patterns)?,
            names: rules.exclude.filenames.into_iter().collect(),
            extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        })
    }

    /// Returns true if the file at `relative_path` (relative to the root) may be organized.
    pub fn should_include(&self, relative_path: &Path) -> bool {
        if self
            .included_globs
            .iter()
            .any(|glob| glob.matches_path(relative_path))
        {
            return true;
        }

        let file_name = relative_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if !self.hidden_files && file_name.starts_with('.') {
            return false;
        }
        if self.names.contains(file_name.as_ref()) {
            return false;
        }
        let excluded_extension = relative_path
            .extension()
            .is_some_and(|ext| self.extensions.contains(&ext.to_string_lossy().to_lowercase()));
        if excluded_extension {
            return false;
        }

        !self
            .excluded_globs
            .iter()
            .any(|glob| glob.matches_path(relative_path))
            && !self
                .excluded_regexes
                .iter()
                .any(|regex| regex.is_match(&file_name))
    }
}
