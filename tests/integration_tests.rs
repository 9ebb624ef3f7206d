use clean_folder::cli::{OrganizeCommand, run_cli_with_config};
/// Integration tests for clean-folder
///
/// These tests build small folder trees in a temporary directory, run a full
/// organization over them and inspect the resulting layout.
///
/// Test categories:
/// 1. Category placement
/// 2. Renaming and collisions
/// 3. Archive extraction
/// 4. Cleanup of empty directories
/// 5. Dry run and filtering
/// 6. Binary exit codes
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

// ============================================================================
// Test Utilities
// ============================================================================

/// A temporary folder to organize.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file (and any missing parent folders) with text content.
    fn create_file(&self, rel_path: &str, content: &str) {
        let file_path = self.path().join(rel_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    fn create_subdir(&self, rel_path: &str) {
        fs::create_dir_all(self.path().join(rel_path)).expect("Failed to create subdirectory");
    }

    /// Create a zip archive holding the given (entry name, content) pairs.
    fn create_zip(&self, rel_path: &str, entries: &[(&str, &str)]) {
        let file = File::create(self.path().join(rel_path)).expect("Failed to create zip");
        let mut writer = zip::ZipWriter::new(file);
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .expect("Failed to start zip entry");
            writer
                .write_all(content.as_bytes())
                .expect("Failed to write zip entry");
        }
        writer.finish().expect("Failed to finish zip");
    }

    fn organize(&self) -> Result<(), String> {
        run_cli_with_config(
            OrganizeCommand::Organize { dry_run: false },
            self.path(),
            None,
        )
    }

    fn read(&self, rel_path: &str) -> String {
        fs::read_to_string(self.path().join(rel_path)).expect("Failed to read file")
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_file(), "File should exist: {}", path.display());
    }

    fn assert_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "Path should not exist: {}", path.display());
    }

    /// All files under the fixture, relative to it, sorted.
    fn list_files_recursive(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        Self::walk_dir(self.path(), &mut files);
        let mut files: Vec<_> = files
            .into_iter()
            .map(|p| p.strip_prefix(self.path()).unwrap().to_path_buf())
            .collect();
        files.sort();
        files
    }

    fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) {
        if let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    files.push(path);
                } else if path.is_dir() {
                    Self::walk_dir(&path, files);
                }
            }
        }
    }
}

fn run_binary(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_clean-folder"))
        .args(args)
        .output()
        .expect("Failed to run clean-folder")
}

// ============================================================================
// Test Suite 1: Category placement
// ============================================================================

#[test]
fn test_every_supported_extension_lands_in_its_category() {
    let fixture = TestFixture::new();
    let cases = [
        ("Images", ["jpeg", "png", "jpg", "svg"].as_slice()),
        ("Video", ["avi", "mp4", "mov", "mkv"].as_slice()),
        ("Documents", ["doc", "docx", "txt", "pdf", "xlsx", "pptx"].as_slice()),
        ("Audio", ["mp3", "ogg", "wav", "amr"].as_slice()),
    ];
    for (_, extensions) in &cases {
        for ext in *extensions {
            fixture.create_file(&format!("name.{}", ext), ext);
        }
    }

    fixture.organize().expect("Organize failed");

    for (folder, extensions) in &cases {
        for ext in *extensions {
            fixture.assert_file_exists(&format!("{}/name.{}", folder, ext));
            fixture.assert_not_exists(&format!("name.{}", ext));
        }
    }
}

#[test]
fn test_uppercase_extension_is_classified_and_preserved() {
    let fixture = TestFixture::new();
    fixture.create_file("Holiday.JPG", "img");
    fixture.create_file("Notes.TxT", "txt");

    fixture.organize().expect("Organize failed");

    fixture.assert_file_exists("Images/Holiday.JPG");
    fixture.assert_file_exists("Documents/Notes.TxT");
}

#[test]
fn test_nested_files_are_collected_from_all_depths() {
    let fixture = TestFixture::new();
    fixture.create_file("a/b/c/deep.mp3", "audio");
    fixture.create_file("a/shallow.pdf", "pdf");

    fixture.organize().expect("Organize failed");

    fixture.assert_file_exists("Audio/deep.mp3");
    fixture.assert_file_exists("Documents/shallow.pdf");
    fixture.assert_not_exists("a");
}

#[test]
fn test_unknown_extension_goes_to_unknown_with_full_name_normalized() {
    let fixture = TestFixture::new();
    fixture.create_file("мои заметки.md", "notes");
    fixture.create_file("Makefile", "all:");

    fixture.organize().expect("Organize failed");

    fixture.assert_file_exists("unknown/moi_zametki.md");
    fixture.assert_file_exists("unknown/Makefile");
}

#[test]
fn test_no_file_is_lost_or_duplicated() {
    let fixture = TestFixture::new();
    fixture.create_file("one.png", "1");
    fixture.create_file("dir/one.png", "2");
    fixture.create_file("dir/two.doc", "3");
    fixture.create_file("dir/sub/three.bin", "4");

    fixture.organize().expect("Organize failed");

    assert_eq!(
        fixture.list_files_recursive(),
        vec![
            PathBuf::from("Documents/two.doc"),
            PathBuf::from("Images/one.png"),
            PathBuf::from("Images/one_1.png"),
            PathBuf::from("unknown/three.bin"),
        ]
    );
}

// ============================================================================
// Test Suite 2: Renaming and collisions
// ============================================================================

#[test]
fn test_cyrillic_names_are_transliterated() {
    let fixture = TestFixture::new();
    fixture.create_file("Привет.txt", "hi");
    fixture.create_file("Щука и ёж.mp3", "fish");

    fixture.organize().expect("Organize failed");

    fixture.assert_file_exists("Documents/Privet.txt");
    fixture.assert_file_exists("Audio/SHCHuka_i_ezh.mp3");
}

#[test]
fn test_collision_appends_next_free_index() {
    let fixture = TestFixture::new();
    fixture.create_file("Images/photo.jpg", "first");
    fixture.create_file("Images/photo_1.jpg", "second");
    fixture.create_file("incoming/фото.jpg", "unrelated");
    fixture.create_file("incoming/photo.jpg", "third");

    fixture.organize().expect("Organize failed");

    assert_eq!(fixture.read("Images/photo.jpg"), "first");
    assert_eq!(fixture.read("Images/photo_1.jpg"), "second");
    assert_eq!(fixture.read("Images/photo_2.jpg"), "third");
    assert_eq!(fixture.read("Images/foto.jpg"), "unrelated");
}

#[test]
fn test_names_normalizing_to_same_value_get_suffixes() {
    let fixture = TestFixture::new();
    fixture.create_file("my report.pdf", "a");
    fixture.create_file("my-report.pdf", "b");
    fixture.create_file("my_report.pdf", "c");

    fixture.organize().expect("Organize failed");

    fixture.assert_file_exists("Documents/my_report.pdf");
    fixture.assert_file_exists("Documents/my_report_1.pdf");
    fixture.assert_file_exists("Documents/my_report_2.pdf");
}

#[test]
fn test_second_run_leaves_organized_files_alone() {
    let fixture = TestFixture::new();
    fixture.create_file("song.wav", "wav");

    fixture.organize().expect("First run failed");
    fixture.organize().expect("Second run failed");

    fixture.assert_file_exists("Audio/song.wav");
    fixture.assert_not_exists("Audio/song_1.wav");
}

// ============================================================================
// Test Suite 3: Archive extraction
// ============================================================================

#[test]
fn test_zip_is_flattened_into_archives() {
    let fixture = TestFixture::new();
    fixture.create_zip("bundle.zip", &[("a.txt", "a"), ("sub/b.txt", "b")]);

    fixture.organize().expect("Organize failed");

    assert_eq!(fixture.read("Archives/a.txt"), "a");
    assert_eq!(fixture.read("Archives/b.txt"), "b");
    fixture.assert_not_exists("Archives/sub");
    fixture.assert_not_exists("Documents/a.txt");
}

#[test]
fn test_zip_entries_with_same_base_name_overwrite() {
    let fixture = TestFixture::new();
    fixture.create_zip("dupes.zip", &[("x/same.txt", "first"), ("y/same.txt", "last")]);

    fixture.organize().expect("Organize failed");

    assert_eq!(fixture.read("Archives/same.txt"), "last");
    fixture.assert_not_exists("Archives/same_1.txt");
}

#[test]
fn test_archive_in_subfolder_is_extracted_and_left_in_place() {
    let fixture = TestFixture::new();
    fixture.create_subdir("downloads");
    fixture.create_zip("downloads/pack.zip", &[("inner.png", "png")]);

    fixture.organize().expect("Organize failed");

    fixture.assert_file_exists("Archives/inner.png");
    fixture.assert_file_exists("downloads/pack.zip");
}

#[test]
fn test_invalid_tar_aborts_the_run() {
    let fixture = TestFixture::new();
    fixture.create_file("logs.tar", "not a zip container");

    let result = fixture.organize();

    let message = result.expect_err("A non-zip .tar should fail the run");
    assert!(message.contains("Not a valid zip archive"), "{message}");
    fixture.assert_file_exists("logs.tar");
}

#[test]
fn test_uppercase_zip_suffix_is_moved_not_extracted() {
    let fixture = TestFixture::new();
    fixture.create_zip("BACKUP.ZIP", &[("inside.txt", "x")]);

    fixture.organize().expect("Organize failed");

    fixture.assert_file_exists("Archives/BACKUP.ZIP");
    fixture.assert_not_exists("Archives/inside.txt");
}

// ============================================================================
// Test Suite 4: Cleanup
// ============================================================================

#[test]
fn test_empty_nested_directories_are_removed() {
    let fixture = TestFixture::new();
    fixture.create_subdir("one/two/three");

    fixture.organize().expect("Organize failed");

    fixture.assert_not_exists("one");
}

#[test]
fn test_unused_category_folders_are_removed() {
    let fixture = TestFixture::new();
    fixture.create_file("only.png", "png");

    fixture.organize().expect("Organize failed");

    fixture.assert_file_exists("Images/only.png");
    for folder in ["Video", "Documents", "Audio", "Archives", "unknown"] {
        fixture.assert_not_exists(folder);
    }
}

#[test]
fn test_folder_emptied_by_the_run_is_removed() {
    let fixture = TestFixture::new();
    fixture.create_file("misc/data.unknownext", "x");

    fixture.organize().expect("Organize failed");

    fixture.assert_file_exists("unknown/data.unknownext");
    fixture.assert_not_exists("misc");
}

#[test]
fn test_empty_root_stays() {
    let fixture = TestFixture::new();

    fixture.organize().expect("Organize failed");

    assert!(fixture.path().is_dir());
    assert_eq!(fs::read_dir(fixture.path()).unwrap().count(), 0);
}

// ============================================================================
// Test Suite 5: End to end, dry run and filtering
// ============================================================================

#[test]
fn test_end_to_end_layout() {
    let fixture = TestFixture::new();
    fixture.create_file("report.docx", "doc");
    fixture.create_file("видео.mp4", "vid");
    fixture.create_zip("archive.zip", &[("x.png", "png")]);
    fixture.create_subdir("old");

    fixture.organize().expect("Organize failed");

    fixture.assert_file_exists("Documents/report.docx");
    fixture.assert_file_exists("Video/video.mp4");
    fixture.assert_file_exists("Archives/x.png");
    fixture.assert_not_exists("old");
}

#[test]
fn test_dry_run_changes_nothing() {
    let fixture = TestFixture::new();
    fixture.create_file("Привет.txt", "hi");
    fixture.create_zip("archive.zip", &[("x.png", "png")]);
    fixture.create_subdir("old");
    let before = fixture.list_files_recursive();

    run_cli_with_config(
        OrganizeCommand::Organize { dry_run: true },
        fixture.path(),
        None,
    )
    .expect("Dry run failed");

    assert_eq!(fixture.list_files_recursive(), before);
    assert!(fixture.path().join("old").is_dir());
    fixture.assert_not_exists("Documents");
}

#[test]
fn test_config_excludes_files_from_run() {
    let fixture = TestFixture::new();
    let config_dir = TempDir::new().expect("Failed to create config directory");
    let config_path = config_dir.path().join("rules.toml");
    fs::write(
        &config_path,
        r#"
[filters.exclude]
extensions = ["part"]
patterns = ["keep/**"]
"#,
    )
    .unwrap();
    fixture.create_file("movie.mp4.part", "partial");
    fixture.create_file("keep/notes.txt", "stay");
    fixture.create_file("go.txt", "move");

    run_cli_with_config(
        OrganizeCommand::Organize { dry_run: false },
        fixture.path(),
        Some(&config_path),
    )
    .expect("Organize failed");

    fixture.assert_file_exists("movie.mp4.part");
    fixture.assert_file_exists("keep/notes.txt");
    fixture.assert_file_exists("Documents/go.txt");
}

#[test]
fn test_missing_config_is_an_error() {
    let fixture = TestFixture::new();
    fixture.create_file("go.txt", "move");

    let result = run_cli_with_config(
        OrganizeCommand::Organize { dry_run: false },
        fixture.path(),
        Some(Path::new("/non/existent/rules.toml")),
    );

    assert!(result.is_err());
    fixture.assert_file_exists("go.txt");
}

// ============================================================================
// Test Suite 6: Binary exit codes
// ============================================================================

#[test]
fn test_binary_without_arguments_exits_1() {
    let output = run_binary(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_binary_with_too_many_arguments_exits_1() {
    let output = run_binary(&["one", "two"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_binary_with_invalid_path_exits_1() {
    let fixture = TestFixture::new();
    fixture.create_file("file.txt", "x");
    let file_path = fixture.path().join("file.txt");

    let output = run_binary(&[file_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid folder path"));
    fixture.assert_file_exists("file.txt");
}

#[test]
fn test_binary_success_exits_0() {
    let fixture = TestFixture::new();
    fixture.create_file("report.docx", "doc");

    let output = run_binary(&[fixture.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Files organized"));
    fixture.assert_file_exists("Documents/report.docx");
}
