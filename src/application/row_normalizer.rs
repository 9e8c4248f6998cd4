use thiserror::Error;

use crate::domain::{
    coordinate::{Coordinate, CoordinateError},
    digits::fold_full_width,
    field::{FieldIndex, LogicalField},
    record::Record,
    sheets::raw_grid::{cell, is_blank_row},
};
use crate::ports::clock::Clock;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("malformed coordinate `{text}`: {source}")]
    MalformedCoordinate {
        text: String,
        #[source]
        source: CoordinateError,
    },
}

/// What became of one data row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Record(Record),
    /// Every cell empty. Not worth a log line.
    Blank,
    /// Parsed, but the name cell was blank.
    Nameless,
}

pub fn normalize_row(
    row: &[String],
    index: &FieldIndex,
    clock: &dyn Clock,
) -> Result<RowOutcome, RowError> {
    if is_blank_row(row) {
        return Ok(RowOutcome::Blank);
    }

    let text = |field: LogicalField| {
        index
            .column(field)
            .map(|column| cell(row, column).trim())
            .unwrap_or("")
    };

    let coordinate_text = text(LogicalField::Coordinate);
    let coordinate =
        Coordinate::parse(coordinate_text).map_err(|source| RowError::MalformedCoordinate {
            text: coordinate_text.to_string(),
            source,
        })?;

    let name = text(LogicalField::Name);
    if name.is_empty() {
        return Ok(RowOutcome::Nameless);
    }

    let updated = match text(LogicalField::Updated) {
        "" => clock.timestamp(),
        updated => updated.to_string(),
    };

    let address = Some(text(LogicalField::Address))
        .filter(|address| !address.is_empty())
        .map(str::to_string);

    Ok(RowOutcome::Record(Record {
        name: name.to_string(),
        latitude: coordinate.latitude,
        longitude: coordinate.longitude,
        weight: parse_count(text(LogicalField::Weight)),
        count: parse_count(text(LogicalField::Count)),
        updated,
        address,
    }))
}

/// Reads `"3"`, `"3.0"`, `"3.9"` or `"３"` as 3. Anything that is not a
/// finite, non-negative number within range reads as 0.
pub fn parse_count(text: &str) -> u32 {
    fold_full_width(text.trim())
        .parse::<f64>()
        .ok()
        .map(f64::trunc)
        .filter(|value| value.is_finite() && (0.0..=u32::MAX as f64).contains(value))
        .map(|value| value as u32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::from_rfc3339("2024-05-01T12:30:00+09:00").unwrap()
    }

    fn index() -> FieldIndex {
        FieldIndex::new(1, 0, 2, 3, 4, None)
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn record(cells: &[&str]) -> Record {
        match normalize_row(&row(cells), &index(), &clock()).unwrap() {
            RowOutcome::Record(record) => record,
            other => panic!("expected a record, got {:?}", other),
        }
    }

    #[test]
    fn test_normalizes_full_row() {
        let record = record(&["X", "35.0, 139.0", "2024-01-01 00:00:00", "3", "2"]);
        assert_eq!(
            record,
            Record {
                name: "X".to_string(),
                latitude: 35.0,
                longitude: 139.0,
                weight: 3,
                count: 2,
                updated: "2024-01-01 00:00:00".to_string(),
                address: None,
            }
        );
    }

    #[test]
    fn test_trims_text_cells() {
        let record = record(&["  X  ", " 35.0 139.0 ", " 2024-01-01 ", "1", "1"]);
        assert_eq!(record.name, "X");
        assert_eq!(record.updated, "2024-01-01");
    }

    #[test]
    fn test_blank_row_is_skipped() {
        let outcome = normalize_row(&row(&["", "", "", "", ""]), &index(), &clock());
        assert_eq!(outcome, Ok(RowOutcome::Blank));

        let outcome = normalize_row(&[], &index(), &clock());
        assert_eq!(outcome, Ok(RowOutcome::Blank));
    }

    #[test]
    fn test_blank_name_is_skipped() {
        let outcome = normalize_row(&row(&[" ", "35.0,139.0", "", "1", "1"]), &index(), &clock());
        assert_eq!(outcome, Ok(RowOutcome::Nameless));
    }

    #[test]
    fn test_short_row_is_padded() {
        let record = record(&["X", "35.0,139.0"]);
        assert_eq!(record.weight, 0);
        assert_eq!(record.count, 0);
        assert_eq!(record.updated, "2024-05-01 12:30:00");
    }

    #[test]
    fn test_blank_updated_uses_clock() {
        let record = record(&["X", "35.0,139.0", "   ", "1", "1"]);
        assert_eq!(record.updated, "2024-05-01 12:30:00");
    }

    #[test]
    fn test_malformed_coordinate_is_row_error() {
        let outcome = normalize_row(&row(&["X", "35.0", "", "1", "1"]), &index(), &clock());
        assert_eq!(
            outcome,
            Err(RowError::MalformedCoordinate {
                text: "35.0".to_string(),
                source: CoordinateError::TokenCount { tokens: 1 },
            })
        );
    }

    #[test]
    fn test_address_column() {
        let index = FieldIndex::new(1, 0, 2, 3, 4, Some(5));
        let outcome = normalize_row(
            &row(&["X", "35.0,139.0", "", "1", "1", " 京都市中京区 "]),
            &index,
            &clock(),
        );
        match outcome {
            Ok(RowOutcome::Record(record)) => {
                assert_eq!(record.address.as_deref(), Some("京都市中京区"))
            }
            other => panic!("expected a record, got {:?}", other),
        }

        let outcome = normalize_row(&row(&["X", "35.0,139.0", "", "1", "1", ""]), &index, &clock());
        assert!(matches!(outcome, Ok(RowOutcome::Record(Record { address: None, .. }))));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count("3.0"), 3);
        assert_eq!(parse_count("3.9"), 3);
        assert_eq!(parse_count(" 12 "), 12);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("many"), 0);
        assert_eq!(parse_count("-2"), 0);
        assert_eq!(parse_count("inf"), 0);
        assert_eq!(parse_count("NaN"), 0);
        assert_eq!(parse_count("1e20"), 0);
    }

    #[test]
    fn test_parse_count_full_width() {
        assert_eq!(parse_count("３"), 3);
        assert_eq!(parse_count("１２．０"), 12);
        assert_eq!(parse_count("\u{3000}２\u{3000}"), 2);
        assert_eq!(parse_count("－２"), 0);
    }

    #[test]
    fn test_full_width_row() {
        let record = record(&["X", "３５.０，１３９.０", "", "３", "２"]);
        assert_eq!((record.latitude, record.longitude), (35.0, 139.0));
        assert_eq!((record.weight, record.count), (3, 2));
    }
}
