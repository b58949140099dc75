//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for enumerating and reading markdown
//! sources, along with [`StorageError`] for unified error handling across
//! backends.
//!
//! # Path Convention
//!
//! All path parameters are **relative source paths** with their extension and
//! forward-slash separators, regardless of the host platform:
//! - `"intro.md"` - file at the content root
//! - `"guides/setup.md"` - nested file
//! - `"notes.mdx"` - MDX file
//!
//! Storage implementations handle the mapping to their internal location.

use std::path::PathBuf;

/// File extensions recognised as markdown sources.
pub const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// A markdown source discovered by [`Storage::scan`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// Relative path with extension, `/`-separated (e.g., "guides/setup.md").
    pub path: String,
}

impl SourceFile {
    /// Create a source file reference from a relative path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Final path segment (e.g., "setup.md").
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Base name without its extension (e.g., "setup").
    #[must_use]
    pub fn stem(&self) -> &str {
        let name = self.file_name();
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }

    /// Extension without the dot, if any (e.g., "md").
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        match self.file_name().rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Whether the extension is one of [`MARKDOWN_EXTENSIONS`].
    pub(crate) fn is_markdown(&self) -> bool {
        self.extension()
            .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext))
    }
}


/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Content is not valid UTF-8 text.
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for markdown source enumeration and retrieval.
///
/// Provides a unified interface for accessing content regardless of backend.
/// The content root is fixed when the backend is constructed.
pub trait Storage: Send + Sync {
    /// Enumerate every markdown source (`.md` / `.mdx`) below the root.
    ///
    /// A missing root is not an error: it yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if enumeration fails for a reason other than
    /// the root being absent.
    fn scan(&self) -> Result<Vec<SourceFile>, StorageError>;

    /// Read full text of a source.
    ///
    /// # Arguments
    ///
    /// * `path` - Relative source path (e.g., "guides/setup.md")
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read as text.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Check if a source exists at the given relative path.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &str) -> bool;
}
