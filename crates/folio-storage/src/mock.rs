//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use crate::storage::{SourceFile, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores sources in memory, keyed by relative path. Scans return paths in
/// lexicographic order, mirroring [`FsStorage`](crate::FsStorage).
///
/// # Example
///
/// ```
/// use folio_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("guides/setup.md", "---\ntitle: Setup\n---\nSteps.")
///     .with_unreadable("broken.md");
///
/// assert_eq!(storage.scan().unwrap().len(), 2);
/// assert!(storage.read("broken.md").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<String, String>>,
    unreadable: RwLock<BTreeSet<String>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source with the given text.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Add a source that shows up in scans but fails on read.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, path: impl Into<String>) -> Self {
        self.unreadable.write().unwrap().insert(path.into());
        self
    }

    /// Replace the text of a source after construction.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_file(&self, path: impl Into<String>, content: impl Into<String>) {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<SourceFile>, StorageError> {
        let files = self.files.read().unwrap();
        let unreadable = self.unreadable.read().unwrap();

        let paths: BTreeSet<&String> = files.keys().chain(unreadable.iter()).collect();
        Ok(paths
            .into_iter()
            .map(|p| SourceFile::new(p.clone()))
            .filter(SourceFile::is_markdown)
            .collect())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        if self.unreadable.read().unwrap().contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }

        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.read().unwrap().contains_key(path)
            || self.unreadable.read().unwrap().contains(path)
    }
}
