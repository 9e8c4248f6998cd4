use error_stack::ResultExt;
use google_sheets4::Sheets;
use tracing::instrument;

use super::{auth, http_client};
use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::ports::grid_source::GridSourceError;

pub const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Read-only client for the Sheets values API.
pub struct SpreadsheetManager {
    pub(super) hub: Sheets<http_client::HttpsConnector>,
}

impl std::fmt::Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadsheetManager").finish_non_exhaustive()
    }
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: &SpreadsheetConfig,
    ) -> error_stack::Result<Self, GridSourceError> {
        let client = http_client::http_client()
            .change_context(GridSourceError::Unauthorized)
            .attach_printable("could not load the native TLS root certificates")?;
        let auth = auth::auth(config, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager { hub })
    }
}
