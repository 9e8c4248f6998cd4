use error_stack::report;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::instrument;

use crate::domain::field::{FieldIndex, LogicalField};

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error(
        "header row has no column for `{field}` (accepted: {}; header: {header:?})",
        .field.aliases().join(" / ")
    )]
    MissingColumn {
        field: LogicalField,
        header: Vec<String>,
    },
}

/// Drops every whitespace character, so `"電池 交換比重 "` matches `"電池交換比重"`.
pub fn normalize_header(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Maps the header row to column positions.
///
/// A field binds to the leftmost column whose header matches any of its
/// aliases, whichever alias that is.
#[instrument(level = "debug")]
pub fn resolve_fields(header: &[String]) -> error_stack::Result<FieldIndex, HeaderError> {
    let normalized: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();

    let required = |field: LogicalField| {
        find_column(&normalized, field).ok_or_else(|| {
            report!(HeaderError::MissingColumn {
                field,
                header: header.to_vec(),
            })
        })
    };

    let index = FieldIndex::new(
        required(LogicalField::Coordinate)?,
        required(LogicalField::Name)?,
        required(LogicalField::Updated)?,
        required(LogicalField::Weight)?,
        required(LogicalField::Count)?,
        find_column(&normalized, LogicalField::Address),
    );

    for field in LogicalField::iter() {
        if let Some(column) = index.column(field) {
            tracing::debug!(%field, column, header = %header[column], "resolved column");
        }
    }

    Ok(index)
}

fn find_column(normalized_header: &[String], field: LogicalField) -> Option<usize> {
    let aliases: Vec<String> = field.aliases().iter().map(|a| normalize_header(a)).collect();
    normalized_header
        .iter()
        .position(|cell| aliases.contains(cell))
}
