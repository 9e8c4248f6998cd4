pub const DEFAULT_RANGE: &str = "GoogleMAPプロット用!A:E";

#[derive(serde::Deserialize, Clone)]
pub struct SpreadsheetConfig {
    #[serde(rename = "sheet_id")]
    pub spreadsheet_id: Box<str>,
    #[serde(default = "default_range")]
    pub range: Box<str>,
    /// Service account key, as the JSON text Google hands out.
    #[serde(rename = "google_credentials")]
    pub credentials: Box<str>,
}

impl std::fmt::Debug for SpreadsheetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadsheetConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .field("credentials", &"<redacted>")
            .finish()
    }
}

fn default_range() -> Box<str> {
    DEFAULT_RANGE.into()
}
