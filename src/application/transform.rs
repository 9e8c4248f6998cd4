use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use super::{
    deduplicator::{deduplicate_latest, sort_for_presentation},
    header_resolver::resolve_fields,
    row_normalizer::{normalize_row, RowOutcome},
};
use crate::domain::{
    record::Record,
    sheets::{raw_grid::RawGrid, row::SheetRow},
};
use crate::ports::clock::Clock;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("spreadsheet returned no rows")]
    Empty,
    #[error("could not resolve the header row")]
    UnresolvedHeader,
}

/// Row accounting for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformReport {
    pub data_rows: usize,
    pub blank_rows: usize,
    pub nameless_rows: usize,
    pub rejected_rows: usize,
    pub duplicates: usize,
    pub items: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub records: Vec<Record>,
    pub report: TransformReport,
}

/// Turns a fetched grid into deduplicated records in presentation order.
///
/// Only grid-level problems fail the call. A row that cannot be turned into a
/// record is logged and skipped.
#[instrument(skip_all, fields(rows = grid.len()))]
pub fn transform(
    grid: &RawGrid,
    clock: &dyn Clock,
) -> error_stack::Result<Transformed, GridError> {
    let (header, rows) = grid.split_first().ok_or(report!(GridError::Empty))?;
    let index = resolve_fields(header).change_context(GridError::UnresolvedHeader)?;

    let mut report = TransformReport {
        data_rows: rows.len(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(rows.len());

    for (data_index, row) in rows.iter().enumerate() {
        let sheet_row = SheetRow::from_data_index(data_index);
        match normalize_row(row, &index, clock) {
            Ok(RowOutcome::Record(record)) => records.push(record),
            Ok(RowOutcome::Blank) => report.blank_rows += 1,
            Ok(RowOutcome::Nameless) => {
                tracing::debug!(row = %sheet_row, "skipping row without a name");
                report.nameless_rows += 1;
            }
            Err(error) => {
                tracing::warn!(row = %sheet_row, cells = ?row, "skipping row: {error}");
                report.rejected_rows += 1;
            }
        }
    }

    let (mut records, duplicates) = deduplicate_latest(records);
    sort_for_presentation(&mut records);

    report.duplicates = duplicates;
    report.items = records.len();

    Ok(Transformed { records, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::application::header_resolver::HeaderError;
    use crate::domain::field::LogicalField;

    fn grid(rows: &[&[&str]]) -> RawGrid {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn clock() -> FixedClock {
        FixedClock::from_rfc3339("2024-05-01T12:30:00+09:00").unwrap()
    }

    const HEADER: &[&str] = &[
        "ポート名",
        "プロット用緯度経度",
        "更新日時",
        "電池交換比重",
        "目安交換台数",
    ];

    #[test]
    fn test_single_row_and_blank_row() {
        let grid = grid(&[
            HEADER,
            &["X", "35.0, 139.0", "2024-01-01 00:00:00", "3", "2"],
            &["", "", "", "", ""],
        ]);

        let transformed = transform(&grid, &clock()).unwrap();

        assert_eq!(transformed.records.len(), 1);
        let item = &transformed.records[0];
        assert_eq!(item.name, "X");
        assert_eq!((item.latitude, item.longitude), (35.0, 139.0));
        assert_eq!((item.weight, item.count), (3, 2));
        assert_eq!(
            transformed.report,
            TransformReport {
                data_rows: 2,
                blank_rows: 1,
                items: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_bad_row_does_not_abort_batch() {
        let grid = grid(&[
            HEADER,
            &["A", "35.0", "", "1", "1"],
            &["B", "35.0,139.0,1", "", "1", "1"],
            &["C", "35.0 139.0", "", "1", "1"],
            &["", "35.1,139.1", "", "9", "9"],
        ]);

        let transformed = transform(&grid, &clock()).unwrap();

        assert_eq!(transformed.records.len(), 1);
        assert_eq!(transformed.records[0].name, "C");
        assert_eq!(transformed.report.rejected_rows, 2);
        assert_eq!(transformed.report.nameless_rows, 1);
    }

    #[test]
    fn test_duplicates_then_sort() {
        let grid = grid(&[
            HEADER,
            &["B", "35.0,139.0", "", "1", "5"],
            &["A", "35.1,139.1", "", "1", "5"],
            &["C", "35.2,139.2", "", "1", "0"],
            &["C", "35.2,139.2", "", "2", "0"],
        ]);

        let transformed = transform(&grid, &clock()).unwrap();

        let names: Vec<_> = transformed.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(transformed.records[0].weight, 2);
        assert_eq!(transformed.report.duplicates, 1);
    }

    #[test]
    fn test_header_only_grid_is_empty_feed() {
        let transformed = transform(&grid(&[HEADER]), &clock()).unwrap();
        assert!(transformed.records.is_empty());
    }

    #[test]
    fn test_empty_grid_is_fatal() {
        let report = transform(&Vec::new(), &clock()).unwrap_err();
        assert!(matches!(report.current_context(), GridError::Empty));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let grid = grid(&[&["ポート名", "更新日時", "電池交換比重", "目安交換台数"]]);
        let report = transform(&grid, &clock()).unwrap_err();

        assert!(matches!(
            report.current_context(),
            GridError::UnresolvedHeader
        ));
        let missing = report
            .downcast_ref::<HeaderError>()
            .expect("header error is kept in the report");
        assert!(matches!(
            missing,
            HeaderError::MissingColumn {
                field: LogicalField::Coordinate,
                ..
            }
        ));
    }
}
