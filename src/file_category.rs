//! File categorization by extension.
//!
//! This module maps a file extension (with its leading dot) to one of the fixed
//! destination categories. Matching is case-insensitive.
//!
//! # Examples
//!
//! ```
//! use clean_folder::file_category::{Category, classify};
//!
//! assert_eq!(classify(".png"), Some(Category::Images));
//! assert_eq!(classify(".MP3"), Some(Category::Audio));
//! assert_eq!(classify(".xyz"), None);
//! ```

/// Represents a destination category.
///
/// Every category except `Unknown` has a fixed list of extensions.
/// `Unknown` collects everything that no list claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Image files (JPEG, PNG, SVG)
    Images,
    /// Video files (AVI, MP4, MOV, MKV)
    Video,
    /// Document files (DOC, DOCX, TXT, PDF, XLSX, PPTX)
    Documents,
    /// Audio files (MP3, OGG, WAV, AMR)
    Audio,
    /// Archive files (ZIP, GZ, TAR)
    Archives,
    /// Files with an unrecognized extension
    Unknown,
}

const IMAGE_EXTENSIONS: &[&str] = &[".jpeg", ".png", ".jpg", ".svg"];
const VIDEO_EXTENSIONS: &[&str] = &[".avi", ".mp4", ".mov", ".mkv"];
const DOCUMENT_EXTENSIONS: &[&str] = &[".doc", ".docx", ".txt", ".pdf", ".xlsx", ".pptx"];
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".ogg", ".wav", ".amr"];
const ARCHIVE_EXTENSIONS: &[&str] = &[".zip", ".gz", ".tar"];

impl Category {
    /// The categories that own an extension list, in matching order.
    ///
    /// Their folders are created up front at the start of every run.
    pub const FIXED: [Category; 5] = [
        Category::Images,
        Category::Video,
        Category::Documents,
        Category::Audio,
        Category::Archives,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use clean_folder::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Unknown.dir_name(), "unknown");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Video => "Video",
            Category::Documents => "Documents",
            Category::Audio => "Audio",
            Category::Archives => "Archives",
            Category::Unknown => "unknown",
        }
    }

    /// Returns the lowercase extensions (leading dot included) recognized for this category.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Images => IMAGE_EXTENSIONS,
            Category::Video => VIDEO_EXTENSIONS,
            Category::Documents => DOCUMENT_EXTENSIONS,
            Category::Audio => AUDIO_EXTENSIONS,
            Category::Archives => ARCHIVE_EXTENSIONS,
            Category::Unknown => &[],
        }
    }

    /// Returns a human-readable description of this category.
    pub fn description(&self) -> &'static str {
        match self {
            Category::Images => "Image files",
            Category::Video => "Video files",
            Category::Documents => "Document files",
            Category::Audio => "Audio files",
            Category::Archives => "Archive files",
            Category::Unknown => "Unrecognized files",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Maps an extension such as `".JPG"` to its category.
///
/// Returns `None` when no fixed category lists the extension; callers then
/// fall back to [`Category::Unknown`].
pub fn classify(extension: &str) -> Option<Category> {
    let extension = extension.to_lowercase();
    Category::FIXED
        .into_iter()
        .find(|category| category.extensions().contains(&extension.as_str()))
}

/// Returns true when a path should be routed to archive extraction.
///
/// This is a plain, case-sensitive suffix match on the whole path string:
/// `backup.zip` matches, `backup.ZIP` and `notazip` do not.
pub fn is_archive_path(path: &str) -> bool {
    ARCHIVE_EXTENSIONS
        .iter()
        .any(|suffix| path.ends_with(suffix))
}
