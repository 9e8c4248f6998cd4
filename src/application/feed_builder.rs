use std::sync::Arc;

use error_stack::{Report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use super::{
    output_writer::{describe, OutputError, OutputWriter, WriteOutcome},
    transform::{transform, TransformReport},
};
use crate::domain::document::{ErrorDocument, OutputDocument};
use crate::ports::{clock::Clock, grid_source::GridSource};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("fatal input error")]
    FatalInput,
    #[error("data validation failed")]
    Validation,
    #[error("failed to write output")]
    Output,
}

impl BuildError {
    /// Validation failures are reported through the error document only.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BuildError::Validation)
    }
}

/// Sheet and range to read the feed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTarget {
    pub sheet_id: String,
    pub range: String,
}

/// How a run ended, after any error document has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Written { report: TransformReport },
    Unchanged { report: TransformReport },
    Checked { report: TransformReport },
    Rejected { message: String },
    Failed { message: String },
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, BuildOutcome::Failed { .. })
    }
}

pub struct FeedBuilder {
    source: Arc<dyn GridSource>,
    clock: Arc<dyn Clock>,
    writer: OutputWriter,
    target: SheetTarget,
}

impl std::fmt::Debug for FeedBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedBuilder")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl FeedBuilder {
    pub fn new(
        source: Arc<dyn GridSource>,
        clock: Arc<dyn Clock>,
        writer: OutputWriter,
        target: SheetTarget,
    ) -> Self {
        Self {
            source,
            clock,
            writer,
            target,
        }
    }

    /// Fetches the sheet and builds the candidate document without touching
    /// any stored document.
    #[instrument(skip(self), fields(sheet_id = %self.target.sheet_id, range = %self.target.range))]
    pub async fn build(
        &self,
    ) -> error_stack::Result<(OutputDocument, TransformReport), BuildError> {
        let grid = self
            .source
            .fetch(&self.target.sheet_id, &self.target.range)
            .await
            .change_context(BuildError::FatalInput)?;

        let transformed =
            transform(&grid, self.clock.as_ref()).change_context(BuildError::FatalInput)?;

        tracing::info!(
            data_rows = transformed.report.data_rows,
            blank = transformed.report.blank_rows,
            nameless = transformed.report.nameless_rows,
            rejected = transformed.report.rejected_rows,
            duplicates = transformed.report.duplicates,
            items = transformed.report.items,
            "transformed sheet rows"
        );

        let document = OutputDocument {
            generated_at: self.clock.timestamp(),
            items: transformed.records,
        };
        Ok((document, transformed.report))
    }

    /// Full run: build, validate, write. Every failure ends up in the error
    /// document and the data document is left as it was.
    pub async fn run(&self) -> BuildOutcome {
        match self.build_and_write().await {
            Ok((report, WriteOutcome::Written)) => BuildOutcome::Written { report },
            Ok((report, WriteOutcome::Suppressed)) => BuildOutcome::Unchanged { report },
            Err(error) => record_failure(&self.writer, self.clock.as_ref(), error, true),
        }
    }

    /// Dry run: build and validate only. Nothing is written, not even the
    /// error document.
    pub async fn check(&self) -> BuildOutcome {
        let result = match self.build().await {
            Ok((document, report)) => self
                .writer
                .validate(&document)
                .map(|()| report)
                .map_err(lift_output_error),
            Err(error) => Err(error),
        };

        match result {
            Ok(report) => BuildOutcome::Checked { report },
            Err(error) => record_failure(&self.writer, self.clock.as_ref(), error, false),
        }
    }

    async fn build_and_write(
        &self,
    ) -> error_stack::Result<(TransformReport, WriteOutcome), BuildError> {
        let (document, report) = self.build().await?;
        let outcome = self.writer.write(document).map_err(lift_output_error)?;
        Ok((report, outcome))
    }
}

/// Logs a failed run and, when `persist` is set, records it in the error
/// document. Also used for failures that happen before a `FeedBuilder` exists.
pub fn record_failure(
    writer: &OutputWriter,
    clock: &dyn Clock,
    error: Report<BuildError>,
    persist: bool,
) -> BuildOutcome {
    let message = describe(&error);
    let fatal = error.current_context().is_fatal();
    if fatal {
        tracing::error!("build failed: {error:?}");
    } else {
        tracing::warn!("build rejected: {error:?}");
    }

    if persist {
        let document = ErrorDocument::failure(message.clone(), clock.timestamp());
        if let Err(write_error) = writer.write_error(&document) {
            tracing::error!("could not write error document: {write_error:?}");
            return BuildOutcome::Failed { message };
        }
    }

    if fatal {
        BuildOutcome::Failed { message }
    } else {
        BuildOutcome::Rejected { message }
    }
}

fn lift_output_error(report: Report<OutputError>) -> Report<BuildError> {
    let context = match report.current_context() {
        OutputError::Validation => BuildError::Validation,
        OutputError::Render(_) | OutputError::Persist(_) => BuildError::Output,
    };
    report.change_context(context)
}
