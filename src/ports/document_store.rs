use strum::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DocumentKind {
    Data,
    Error,
}

#[derive(Error, Debug)]
pub enum DocumentStoreError {
    #[error("Failed to read {0} document")]
    ReadFailed(DocumentKind),
    #[error("Failed to write {0} document")]
    WriteFailed(DocumentKind),
}

/// Persistence for the rendered documents.
pub trait DocumentStore: Send + Sync {
    /// Current contents, or `None` when the document has never been written.
    fn read(&self, kind: DocumentKind) -> error_stack::Result<Option<String>, DocumentStoreError>;

    /// Replaces the document. Readers must never observe a partial write.
    fn write(&self, kind: DocumentKind, contents: &str)
    -> error_stack::Result<(), DocumentStoreError>;
}
