use crate::config::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Category of a discovered file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// TypeScript or JavaScript source
    Source,
    /// YAML manifest (config, CI pipeline, Kubernetes resource)
    Manifest,
}

/// Represents a discovered candidate file
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Path to the file
    pub path: PathBuf,

    /// Detected category
    pub category: FileCategory,
}

impl ScannedFile {
    pub fn new(path: PathBuf, category: FileCategory) -> Self {
        Self { path, category }
    }
}

/// File finder for discovering candidate files under a root directory
///
/// The walk is depth-first and ordered, skips any directory whose name is on
/// the configured ignore list, and never fails: unreadable entries are logged
/// as warnings and skipped, degrading to a partial result.
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find all files of the given category under `root`
    pub fn find(&self, root: &Path, category: FileCategory) -> Vec<ScannedFile> {
        debug!("Scanning for files in: {}", root.display());

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Failed to read entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if self.category_of(entry.path()) == Some(category) {
                trace!("Found {:?}: {}", category, entry.path().display());
                files.push(ScannedFile::new(entry.path().to_path_buf(), category));
            }
        }

        debug!("Found {} {:?} files", files.len(), category);
        files
    }

    /// Find TypeScript/JavaScript source files
    pub fn find_source_files(&self, root: &Path) -> Vec<ScannedFile> {
        self.find(root, FileCategory::Source)
    }

    /// Find YAML manifest files
    pub fn find_manifest_files(&self, root: &Path) -> Vec<ScannedFile> {
        self.find(root, FileCategory::Manifest)
    }

    /// Determine the category of a path from its extension
    pub fn category_of(&self, path: &Path) -> Option<FileCategory> {
        let extension = path.extension()?.to_str()?;
        if self.config.is_source_extension(extension) {
            Some(FileCategory::Source)
        } else if self.config.is_manifest_extension(extension) {
            Some(FileCategory::Manifest)
        } else {
            None
        }
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        // Never filter the root itself, even if its name matches
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        entry
            .file_name()
            .to_str()
            .map(|name| self.config.is_ignored_dir(name))
            .unwrap_or(false)
    }
}
