/// Zip archive extraction.
///
/// Archives are unpacked into a scoped temporary directory and every file found
/// there is moved straight into the target folder, discarding the directory
/// structure inside the archive.
use crate::file_organizer::{OrganizeError, OrganizeResult, move_path};
use std::fs::{self, File};
use std::path::Path;
use walkdir::WalkDir;

/// Opens a zip archive, mapping format errors to [`OrganizeError::InvalidArchive`].
fn open_zip(archive_path: &Path) -> OrganizeResult<zip::ZipArchive<File>> {
    let file = File::open(archive_path).map_err(|e| OrganizeError::InvalidArchive {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    zip::ZipArchive::new(file).map_err(|e| OrganizeError::InvalidArchive {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Extracts a zip archive and flattens its files into `target_folder`.
///
/// Only the base name of each extracted file is kept. When two entries share a
/// base name, the one moved last overwrites the earlier one. Extracted names are
/// not normalized. The archive itself is left where it is.
///
/// The temporary directory is removed when this function returns, whether
/// extraction succeeded or not.
///
/// # Returns
///
/// The number of files moved into `target_folder`.
///
/// # Errors
///
/// Returns `OrganizeError::InvalidArchive` if the file is not a readable zip
/// container (this is the case for `.gz` and `.tar` files), and
/// `OrganizeError::ExtractionFailed` if unpacking fails midway.
pub fn extract_archive(archive_path: &Path, target_folder: &Path) -> OrganizeResult<usize> {
    extract_archive_via(archive_path, target_folder, &std::env::temp_dir())
}

/// Does the work of [`extract_archive`], creating the scoped directory inside `temp_parent`.
fn extract_archive_via(
    archive_path: &Path,
    target_folder: &Path,
    temp_parent: &Path,
) -> OrganizeResult<usize> {
    let mut archive = open_zip(archive_path)?;

    fs::create_dir_all(target_folder).map_err(|e| OrganizeError::DirectoryCreationFailed {
        path: target_folder.to_path_buf(),
        source: e,
    })?;

    let temp_dir = tempfile::Builder::new()
        .prefix(".clean-folder-")
        .tempdir_in(temp_parent)
        .map_err(|e| OrganizeError::ExtractionFailed {
            path: archive_path.to_path_buf(),
            reason: format!("could not create temporary directory: {}", e),
        })?;

    archive
        .extract(temp_dir.path())
        .map_err(|e| OrganizeError::ExtractionFailed {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut moved = 0;
    for entry in WalkDir::new(temp_dir.path()).sort_by_file_name() {
        let entry = entry.map_err(|e| OrganizeError::ExtractionFailed {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let destination = target_folder.join(entry.file_name());
        log::debug!(
            "extracted {} -> {}",
            entry.path().display(),
            destination.display()
        );
        move_path(entry.path(), &destination).map_err(|e| OrganizeError::FileMoveFailure {
            source: entry.path().to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;
        moved += 1;
    }

    Ok(moved)
}

/// Counts the file entries of a zip archive without extracting it.
///
/// Used for dry runs. Directory entries are not counted.
pub fn count_archive_entries(archive_path: &Path) -> OrganizeResult<usize> {
    let archive = open_zip(archive_path)?;
    Ok(archive
        .file_names()
        .filter(|name| !name.ends_with('/'))
        .count())
}
