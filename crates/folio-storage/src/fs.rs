//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading markdown sources from a local directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{SourceFile, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Pick the content root: `primary` when it exists, otherwise `fallback`.
///
/// The fallback is returned even if it does not exist either; scanning a
/// missing root yields no sources.
#[must_use]
pub fn resolve_content_root(primary: &Path, fallback: &Path) -> PathBuf {
    if primary.is_dir() {
        primary.to_path_buf()
    } else {
        tracing::debug!(
            primary = %primary.display(),
            fallback = %fallback.display(),
            "Primary content directory missing, using fallback"
        );
        fallback.to_path_buf()
    }
}

/// Filesystem storage implementation.
///
/// Walks the content root recursively and reports every `.md` / `.mdx` file
/// it finds. Entries are visited in file-name order so scans are
/// deterministic across platforms.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use folio_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let files = storage.scan()?;
/// # Ok::<(), folio_storage::StorageError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FsStorage {
    /// Root directory for markdown sources.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Content root this storage reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a path doesn't escape the content root.
    ///
    /// Rejects absolute paths and paths containing parent directory
    /// components (`..`).
    fn validate_path(path: &str) -> Result<(), StorageError> {
        let escapes = Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Scan directory recursively and collect markdown sources.
    ///
    /// `prefix` is the `/`-joined path of `dir_path` relative to the root.
    fn scan_directory(
        dir_path: &Path,
        prefix: &str,
        files: &mut Vec<SourceFile>,
    ) -> Result<(), StorageError> {
        let entries = fs::read_dir(dir_path).map_err(|e| {
            StorageError::io(e, Some(dir_path.to_path_buf())).with_backend(BACKEND)
        })?;

        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e, is_dir, name)
            })
            .collect();
        entries.sort_by(|(_, _, a), (_, _, b)| a.cmp(b));

        for (entry, is_dir, name) in entries {
            let rel_path = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };

            if is_dir {
                // A broken subdirectory must not hide the rest of the tree
                if let Err(e) = Self::scan_directory(&entry.path(), &rel_path, files) {
                    tracing::warn!(path = %rel_path, error = %e, "Skipping unreadable directory");
                }
            } else {
                let file = SourceFile::new(rel_path);
                if file.is_markdown() {
                    files.push(file);
                }
            }
        }

        Ok(())
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<SourceFile>, StorageError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        Self::scan_directory(&self.root, "", &mut files)?;
        tracing::debug!(root = %self.root.display(), count = files.len(), "Scanned content root");
        Ok(files)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self.root.join(path);
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        Self::validate_path(path).is_ok() && self.root.join(path).is_file()
    }
}
