use error_stack::ResultExt;
use google_sheets4::hyper;
use google_sheets4::oauth2::{self, authenticator::Authenticator};

use super::http_client::HttpsConnector;
use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::ports::grid_source::GridSourceError;

pub async fn auth(
    config: &SpreadsheetConfig,
    client: hyper::Client<HttpsConnector>,
) -> error_stack::Result<Authenticator<HttpsConnector>, GridSourceError> {
    let secret: oauth2::ServiceAccountKey =
        oauth2::parse_service_account_key(config.credentials.as_bytes())
            .change_context(GridSourceError::Unauthorized)
            .attach_printable("GOOGLE_CREDENTIALS is not a service account key")?;

    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(GridSourceError::Unauthorized)
        .attach_printable("could not create an authenticator")
}
