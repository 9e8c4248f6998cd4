use config::Config;
use error_stack::{report, ResultExt};
use serde::de::IntoDeserializer;
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{output_config::OutputConfig, sheets_config::SpreadsheetConfig};

pub const DEFAULT_CONFIG_PATH: &str = "Config";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration (file: {config_path})")]
    Unreadable { config_path: String },
    #[error("invalid configuration at `{field}`: {details}")]
    Invalid { field: String, details: String },
    #[error("required setting `{0}` is blank")]
    Blank(&'static str),
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(flatten)]
    pub sheets: SpreadsheetConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Reads the optional config file at `config_path`, then lets environment
    /// variables override it (`SHEET_ID`, `RANGE`, `GOOGLE_CREDENTIALS`,
    /// `OUTPUT__DATA_PATH`, ...).
    pub fn load(config_path: &str) -> error_stack::Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()
            .change_context_lazy(|| ConfigError::Unreadable {
                config_path: config_path.to_string(),
            })?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> error_stack::Result<Self, ConfigError> {
        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(ConfigError::Invalid {
                field: String::new(),
                details: "configuration is not a map".to_string(),
            })?;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        let parsed = match AppConfig::deserialize(path_de) {
            Ok(parsed) => parsed,
            Err(e) => {
                return Err(report!(ConfigError::Invalid {
                    field: field_path(track),
                    details: e.to_string(),
                }))
            }
        };

        parsed.ensure_required()
    }

    fn ensure_required(self) -> error_stack::Result<Self, ConfigError> {
        if self.sheets.spreadsheet_id.trim().is_empty() {
            return Err(report!(ConfigError::Blank("SHEET_ID")));
        }
        if self.sheets.credentials.trim().is_empty() {
            return Err(report!(ConfigError::Blank("GOOGLE_CREDENTIALS")));
        }
        Ok(self)
    }
}

fn field_path(track: Track) -> String {
    track
        .path()
        .iter()
        .map(|seg| match seg {
            Segment::Seq { index } => format!("[{}]", index),
            Segment::Map { key } => format!(".{}", key),
            Segment::Enum { variant } => format!("::{}", variant),
            Segment::Unknown => String::from("<?>"),
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}
