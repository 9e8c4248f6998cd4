use thiserror::Error;

use crate::domain::sheets::raw_grid::RawGrid;

#[derive(Error, Debug)]
pub enum GridSourceError {
    #[error("Failed to authenticate with the spreadsheet service")]
    Unauthorized,
    #[error("Failed to fetch range {range} from sheet {sheet_id}")]
    FetchFailed { sheet_id: String, range: String },
}

/// Where the raw spreadsheet cells come from.
#[async_trait::async_trait]
pub trait GridSource: Send + Sync {
    /// Returns the values of `range` as rows of cell text, header row first.
    async fn fetch(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> error_stack::Result<RawGrid, GridSourceError>;
}
