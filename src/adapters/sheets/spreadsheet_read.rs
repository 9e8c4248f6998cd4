use error_stack::ResultExt;
use tracing::instrument;

use super::spreadsheet_manager::{SpreadsheetManager, READONLY_SCOPE};
use crate::domain::sheets::raw_grid::{IntoRawGrid, RawGrid};
use crate::ports::grid_source::{GridSource, GridSourceError};

#[async_trait::async_trait]
impl GridSource for SpreadsheetManager {
    #[instrument(skip(self))]
    async fn fetch(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> error_stack::Result<RawGrid, GridSourceError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(sheet_id, range)
            .add_scope(READONLY_SCOPE)
            .doit()
            .await
            .change_context_lazy(|| GridSourceError::FetchFailed {
                sheet_id: sheet_id.to_string(),
                range: range.to_string(),
            })?;

        // The API leaves `values` out entirely when the range is empty
        let grid = response.1.values.unwrap_or_default().into_raw_grid();

        tracing::debug!(rows = grid.len(), "fetched sheet values");
        Ok(grid)
    }
}
