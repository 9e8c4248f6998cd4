use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use error_stack::{report, ResultExt};

use crate::adapters::config::output_config::OutputConfig;
use crate::ports::document_store::{DocumentKind, DocumentStore, DocumentStoreError};

/// Stores each document as a UTF-8 file.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    data_path: PathBuf,
    error_path: PathBuf,
}

impl FileDocumentStore {
    pub fn new(data_path: impl Into<PathBuf>, error_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            error_path: error_path.into(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.data_path, &config.error_path)
    }

    pub fn path(&self, kind: DocumentKind) -> &Path {
        match kind {
            DocumentKind::Data => &self.data_path,
            DocumentKind::Error => &self.error_path,
        }
    }
}

impl DocumentStore for FileDocumentStore {
    fn read(
        &self,
        kind: DocumentKind,
    ) -> error_stack::Result<Option<String>, DocumentStoreError> {
        let path = self.path(kind);
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(report!(error))
                .change_context(DocumentStoreError::ReadFailed(kind))
                .attach_printable_lazy(|| format!("path: {}", path.display())),
        }
    }

    /// Writes a sibling temp file and renames it over the target, so the
    /// previous document stays intact if anything fails midway.
    fn write(
        &self,
        kind: DocumentKind,
        contents: &str,
    ) -> error_stack::Result<(), DocumentStoreError> {
        let path = self.path(kind);
        let staging = staging_path(path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .change_context(DocumentStoreError::WriteFailed(kind))
                .attach_printable_lazy(|| format!("directory: {}", parent.display()))?;
        }

        std::fs::write(&staging, contents)
            .change_context(DocumentStoreError::WriteFailed(kind))
            .attach_printable_lazy(|| format!("path: {}", staging.display()))?;

        std::fs::rename(&staging, path)
            .map_err(|error| {
                let _ = std::fs::remove_file(&staging);
                error
            })
            .change_context(DocumentStoreError::WriteFailed(kind))
            .attach_printable_lazy(|| format!("path: {}", path.display()))
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
