use std::sync::Arc;

use error_stack::{Report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::domain::document::{to_canonical_json, ErrorDocument, OutputDocument};
use crate::ports::{
    document_store::{DocumentKind, DocumentStore},
    schema_validator::SchemaValidator,
};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("candidate document rejected")]
    Validation,
    #[error("failed to render {0} document")]
    Render(DocumentKind),
    #[error("failed to persist {0} document")]
    Persist(DocumentKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The rendered document matched what is already stored.
    Suppressed,
}

pub struct OutputWriter {
    store: Arc<dyn DocumentStore>,
    validator: Arc<dyn SchemaValidator>,
}

impl std::fmt::Debug for OutputWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputWriter").finish_non_exhaustive()
    }
}

impl OutputWriter {
    pub fn new(store: Arc<dyn DocumentStore>, validator: Arc<dyn SchemaValidator>) -> Self {
        Self { store, validator }
    }

    pub fn validate(&self, document: &OutputDocument) -> error_stack::Result<(), OutputError> {
        let value = serde_json::to_value(document)
            .change_context(OutputError::Render(DocumentKind::Data))?;

        self.validator
            .validate(&value)
            .change_context(OutputError::Validation)
    }

    /// Validates and stores the data document unless the stored copy already
    /// has the same content.
    ///
    /// When only `generated_at` would differ, the stored timestamp is kept so
    /// an unchanged feed renders to identical bytes.
    #[instrument(skip_all, fields(items = document.items.len()))]
    pub fn write(
        &self,
        mut document: OutputDocument,
    ) -> error_stack::Result<WriteOutcome, OutputError> {
        self.validate(&document)?;

        let previous = self
            .store
            .read(DocumentKind::Data)
            .change_context(OutputError::Persist(DocumentKind::Data))?;

        if let Some(stored) = previous
            .as_deref()
            .and_then(|text| serde_json::from_str::<OutputDocument>(text).ok())
        {
            if stored.items == document.items {
                document.generated_at = stored.generated_at;
            }
        }

        let rendered = to_canonical_json(&document)
            .change_context(OutputError::Render(DocumentKind::Data))?;

        if previous.as_deref() == Some(rendered.as_str()) {
            tracing::info!("data document unchanged, skipping write");
            return Ok(WriteOutcome::Suppressed);
        }

        self.store
            .write(DocumentKind::Data, &rendered)
            .change_context(OutputError::Persist(DocumentKind::Data))?;

        tracing::info!("wrote data document");
        Ok(WriteOutcome::Written)
    }

    #[instrument(skip_all)]
    pub fn write_error(&self, document: &ErrorDocument) -> error_stack::Result<(), OutputError> {
        let rendered = to_canonical_json(document)
            .change_context(OutputError::Render(DocumentKind::Error))?;

        self.store
            .write(DocumentKind::Error, &rendered)
            .change_context(OutputError::Persist(DocumentKind::Error))
    }
}

/// Renders a report chain as a single line for the error document.
pub fn describe<C>(report: &Report<C>) -> String {
    format!("{report:#}")
}
