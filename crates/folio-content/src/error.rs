//! Error types for content loading.

use folio_storage::StorageError;

/// Error processing a single content file.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Source could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Front matter block is unterminated or not a YAML mapping.
    #[error("Invalid front matter: {0}")]
    FrontMatter(String),
}

#[cfg(test)]
mod tests {
    use folio_storage::StorageErrorKind;

    use super::*;

    #[test]
    fn test_storage_error_is_transparent() {
        let err: ContentError = StorageError::not_found("guide.md").with_backend("Mock").into();

        assert_eq!(err.to_string(), "[Mock] Not found (path: guide.md)");
        assert!(matches!(
            err,
            ContentError::Storage(StorageError {
                kind: StorageErrorKind::NotFound,
                ..
            })
        ));
    }

    #[test]
    fn test_front_matter_error_display() {
        let err = ContentError::FrontMatter("missing closing fence".to_owned());

        assert_eq!(err.to_string(), "Invalid front matter: missing closing fence");
    }
}
