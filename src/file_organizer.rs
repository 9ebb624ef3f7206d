/// Folder organization: moving files into category directories.
///
/// This module walks a root directory, moves every file into the folder of its
/// category under a normalized name, unpacks zip archives into `Archives/` and
/// finally removes directories that were left empty.
use crate::archive::{count_archive_entries, extract_archive};
use crate::config::CompiledFilters;
use crate::file_category::{Category, classify, is_archive_path};
use crate::transliterate::normalize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors that can occur during folder organization.
#[derive(Debug)]
pub enum OrganizeError {
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: io::Error,
    },
    /// The root path is not an existing directory.
    InvalidBasePath { path: PathBuf },
    /// A file routed to extraction is not a readable zip archive.
    InvalidArchive { path: PathBuf, reason: String },
    /// A zip archive could not be unpacked.
    ExtractionFailed { path: PathBuf, reason: String },
    /// The path has no file name component.
    FileNameMissing { path: PathBuf },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::InvalidBasePath { path } => {
                write!(f, "Invalid folder path: {}", path.display())
            }
            Self::InvalidArchive { path, reason } => {
                write!(
                    f,
                    "Not a valid zip archive {}: {}",
                    path.display(),
                    reason
                )
            }
            Self::ExtractionFailed { path, reason } => {
                write!(f, "Failed to extract {}: {}", path.display(), reason)
            }
            Self::FileNameMissing { path } => {
                write!(f, "Path has no file name: {}", path.display())
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryCreationFailed { source, .. } => Some(source),
            Self::FileMoveFailure { source_error, .. } => Some(source_error),
            _ => None,
        }
    }
}

/// Result type for folder organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Moves a file, falling back to copy and remove when a rename is not possible
/// because source and destination live on different filesystems.
///
/// An existing file at `to` is replaced.
pub fn move_path(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

/// Splits a file name into stem and extension the way most path libraries do:
/// the extension starts at the last `.`, unless that dot only belongs to
/// leading dots of a hidden file name.
///
/// `"photo.JPG"` gives `("photo", ".JPG")`, `".bashrc"` gives `(".bashrc", "")`.
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(index) if file_name[..index].chars().any(|c| c != '.') => file_name.split_at(index),
        _ => (file_name, ""),
    }
}

/// Where a single file will go and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// Move the file to `destination` inside the folder of `category`.
    Move {
        source: PathBuf,
        destination: PathBuf,
        category: Category,
    },
    /// The file already sits at its computed destination.
    Keep { path: PathBuf, category: Category },
    /// Unpack the archive into `Archives/`.
    Extract { archive: PathBuf, entries: usize },
}

/// Summary of a completed run.
#[derive(Debug, Default, Clone)]
pub struct OrganizeReport {
    /// Number of files moved per category directory.
    pub moved: BTreeMap<Category, usize>,
    /// Number of files that were already in place.
    pub kept: usize,
    /// Number of archives unpacked.
    pub archives_extracted: usize,
    /// Number of files taken out of archives.
    pub files_extracted: usize,
    /// Number of empty directories removed.
    pub directories_removed: usize,
}

impl OrganizeReport {
    /// Total number of files moved into category directories.
    pub fn total_moved(&self) -> usize {
        self.moved.values().sum()
    }

    fn record_move(&mut self, category: Category) {
        *self.moved.entry(category).or_insert(0) += 1;
    }
}

/// Organizes the contents of one root folder.
///
/// The root is fixed for the lifetime of the organizer; every category folder
/// lives directly under it.
pub struct Organizer {
    root: PathBuf,
    filters: Option<CompiledFilters>,
}

impl Organizer {
    /// Creates an organizer for `root`.
    ///
    /// # Errors
    ///
    /// Returns `OrganizeError::InvalidBasePath` if `root` is not an existing directory.
    pub fn new(root: &Path) -> OrganizeResult<Self> {
        if !root.is_dir() {
            return Err(OrganizeError::InvalidBasePath {
                path: root.to_path_buf(),
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
            filters: None,
        })
    }

    /// Restricts the run to files accepted by `filters`.
    pub fn with_filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    /// The root folder being organized.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the folder for a category under the root.
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Creates the five fixed category folders if they do not exist yet.
    pub fn prepare_category_dirs(&self) -> OrganizeResult<()> {
        for category in Category::FIXED {
            let path = self.category_dir(category);
            fs::create_dir_all(&path)
                .map_err(|e| OrganizeError::DirectoryCreationFailed { path, source: e })?;
        }
        Ok(())
    }

    /// Computes where `file_path` belongs.
    ///
    /// Recognized files keep their extension verbatim and get a normalized stem.
    /// If that name is taken (on disk or in `reserved`), `_1`, `_2`, ... is
    /// appended to the stem until a free name, or the file's own current path,
    /// is found. Unrecognized files go to
    /// `unknown/` under their fully normalized name with no collision handling.
    pub fn destination_for(
        &self,
        file_path: &Path,
        reserved: &HashSet<PathBuf>,
    ) -> OrganizeResult<(Category, PathBuf)> {
        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileNameMissing {
                path: file_path.to_path_buf(),
            })?
            .to_string_lossy();
        let (stem, extension) = split_extension(&file_name);

        let Some(category) = classify(extension) else {
            let destination = self
                .category_dir(Category::Unknown)
                .join(normalize(&file_name));
            return Ok((Category::Unknown, destination));
        };

        let folder = self.category_dir(category);
        let stem = normalize(stem);
        let mut destination = folder.join(format!("{}{}", stem, extension));

        let mut index = 1;
        while destination != file_path
            && (destination.exists() || reserved.contains(&destination))
        {
            destination = folder.join(format!("{}_{}{}", stem, index, extension));
            index += 1;
        }
        Ok((category, destination))
    }

    /// Moves one file into its category folder under a normalized name.
    ///
    /// Returns the category and the final path. A file already at its
    /// destination is left untouched.
    pub fn move_file(&self, file_path: &Path) -> OrganizeResult<(Category, PathBuf)> {
        let (category, destination) = self.destination_for(file_path, &HashSet::new())?;
        if destination == file_path {
            log::debug!("{} already in place", file_path.display());
            return Ok((category, destination));
        }

        if category == Category::Unknown {
            let folder = self.category_dir(Category::Unknown);
            fs::create_dir_all(&folder).map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: folder.clone(),
                source: e,
            })?;
        }

        log::debug!(
            "moving {} -> {}",
            file_path.display(),
            destination.display()
        );
        move_path(file_path, &destination).map_err(|e| OrganizeError::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;
        Ok((category, destination))
    }

    /// Lists every regular file under `current_folder` before anything is moved.
    ///
    /// The list is a snapshot: files that appear later in the run (extracted or
    /// moved) are not part of it. Entries are sorted by file name per directory.
    /// Unreadable directories are skipped with a warning, and files rejected by
    /// the configured filters are left out.
    pub fn collect_files(&self, current_folder: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in WalkDir::new(current_folder).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            if let Some(filters) = &self.filters {
                let relative = entry
                    .path()
                    .strip_prefix(&self.root)
                    .unwrap_or(entry.path());
                if !filters.should_include(relative) {
                    log::debug!("excluded by filters: {}", relative.display());
                    continue;
                }
            }
            files.push(entry.into_path());
        }
        files
    }

    /// Processes every file under `current_folder`.
    ///
    /// Paths ending in `.zip`, `.gz` or `.tar` are unpacked into `Archives/`,
    /// everything else is moved with [`Organizer::move_file`]. `on_file` is
    /// called after each file is handled, together with the size of the snapshot
    /// being processed.
    pub fn organize_recursively(
        &self,
        current_folder: &Path,
        report: &mut OrganizeReport,
        mut on_file: impl FnMut(&Path, usize),
    ) -> OrganizeResult<()> {
        let files = self.collect_files(current_folder);
        let total = files.len();
        log::debug!("{} files to organize", total);

        for file_path in files {
            if is_archive_path(&file_path.to_string_lossy()) {
                let extracted =
                    extract_archive(&file_path, &self.category_dir(Category::Archives))?;
                report.archives_extracted += 1;
                report.files_extracted += extracted;
            } else {
                let (category, destination) = self.move_file(&file_path)?;
                if destination == file_path {
                    report.kept += 1;
                } else {
                    report.record_move(category);
                }
            }
            on_file(&file_path, total);
        }
        Ok(())
    }

    /// Removes every empty directory below the root, deepest first.
    ///
    /// The root itself is never removed. Category folders get no exemption.
    /// Removal failures (non-empty directory, permissions) are ignored.
    ///
    /// # Returns
    ///
    /// The number of directories removed.
    pub fn remove_empty_dirs(&self) -> usize {
        let mut removed = 0;
        let walker = WalkDir::new(&self.root).min_depth(1).contents_first(true);
        for entry in walker.into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_dir() {
                continue;
            }
            match fs::remove_dir(entry.path()) {
                Ok(()) => {
                    log::debug!("removed empty directory {}", entry.path().display());
                    removed += 1;
                }
                Err(e) => log::debug!("kept directory {}: {}", entry.path().display(), e),
            }
        }
        removed
    }

    /// Runs a full organization of the root folder.
    pub fn organize(&self) -> OrganizeResult<OrganizeReport> {
        self.organize_with_progress(|_, _| {})
    }

    /// Like [`Organizer::organize`], calling `on_file` after each file is handled.
    pub fn organize_with_progress(
        &self,
        on_file: impl FnMut(&Path, usize),
    ) -> OrganizeResult<OrganizeReport> {
        let mut report = OrganizeReport::default();
        self.prepare_category_dirs()?;
        self.organize_recursively(&self.root, &mut report, on_file)?;
        report.directories_removed = self.remove_empty_dirs();
        Ok(report)
    }

    /// Computes what [`Organizer::organize`] would do without touching the filesystem.
    ///
    /// Collision suffixes account for earlier files of the same plan.
    pub fn plan(&self) -> OrganizeResult<Vec<PlannedAction>> {
        let mut reserved = HashSet::new();
        let mut actions = Vec::new();

        for file_path in self.collect_files(&self.root) {
            if is_archive_path(&file_path.to_string_lossy()) {
                let entries = count_archive_entries(&file_path)?;
                actions.push(PlannedAction::Extract {
                    archive: file_path,
                    entries,
                });
                continue;
            }

            let (category, destination) = self.destination_for(&file_path, &reserved)?;
            if destination == file_path {
                actions.push(PlannedAction::Keep {
                    path: file_path,
                    category,
                });
            } else {
                reserved.insert(destination.clone());
                actions.push(PlannedAction::Move {
                    source: file_path,
                    destination,
                    category,
                });
            }
        }
        Ok(actions)
    }
}
