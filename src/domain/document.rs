use serde::{Deserialize, Serialize};

use super::record::Record;

/// The data feed: every surviving record in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub generated_at: String,
    pub items: Vec<Record>,
}

/// Written instead of the data feed when a run cannot produce valid output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub generated_at: String,
}

impl ErrorDocument {
    pub fn failure(message: impl Into<String>, generated_at: impl Into<String>) -> Self {
        Self {
            error: true,
            message: Some(message.into()),
            generated_at: generated_at.into(),
        }
    }
}

/// Renders a document the same way on every run: two-space indentation,
/// declaration-order keys, non-ASCII text left as is.
pub fn to_canonical_json<T: Serialize>(document: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}
