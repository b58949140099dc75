//! Content storage abstraction for the folio documentation site.
//!
//! This crate provides a [`Storage`] trait that hides where markdown sources
//! live. The content loader only ever sees relative, forward-slash paths and
//! raw text, which enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Explicit content roots** chosen once by the caller, never probed by the loader
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, and `exists()` methods
//! - [`FsStorage`] implementation for a directory on the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//! - [`resolve_content_root`] for the `docs/` → `content/` fallback
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use folio_storage::{FsStorage, Storage, resolve_content_root};
//!
//! let root = resolve_content_root(Path::new("docs"), Path::new("content"));
//! let storage = FsStorage::new(root);
//! for file in storage.scan()? {
//!     println!("{}", file.path);
//! }
//! # Ok::<(), folio_storage::StorageError>(())
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod storage;

pub use fs::{FsStorage, resolve_content_root};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockStorage;
pub use storage::{MARKDOWN_EXTENSIONS, SourceFile, Storage, StorageError, StorageErrorKind};
