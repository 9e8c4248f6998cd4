use serde_json::Value;

/// Cell text as fetched from the spreadsheet. The first row is the header.
pub type RawGrid = Vec<Vec<String>>;

/// Returns the cell at `index`, treating cells past the end of a short row as empty.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// A row is blank when every cell is empty. Whitespace-only cells count as content.
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.is_empty())
}

pub trait IntoRawGrid {
    fn into_raw_grid(self) -> RawGrid;
}

impl IntoRawGrid for Vec<Vec<Value>> {
    fn into_raw_grid(self) -> RawGrid {
        self.into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}
