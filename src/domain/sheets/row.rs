use std::fmt::Formatter;

/// Position of a data row inside the fetched range.
///
/// The header occupies the first sheet row, so data row `0` is what a person
/// editing the spreadsheet sees as row `2`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SheetRow {
    data_index: usize,
}

impl SheetRow {
    pub fn from_data_index(data_index: usize) -> Self {
        SheetRow { data_index }
    }

    /// Zero-based index among the data rows (header excluded).
    pub fn data_index(&self) -> usize {
        self.data_index
    }

    /// Returns the row number as shown in the spreadsheet UI.
    /// # Examples
    /// ```
    /// use patrol_map_feed::domain::sheets::row::SheetRow;
    /// assert_eq!(SheetRow::from_data_index(0).sheet_row(), 2);
    /// assert_eq!(SheetRow::from_data_index(9).sheet_row(), 11);
    /// ```
    pub fn sheet_row(&self) -> usize {
        self.data_index.saturating_add(2)
    }
}

impl std::fmt::Display for SheetRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sheet_row())
    }
}

impl std::fmt::Debug for SheetRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SheetRow(data_index: {}, row: {})",
            self.data_index(),
            self.sheet_row()
        )
    }
}
