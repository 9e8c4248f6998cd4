use std::path::PathBuf;

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default = "default_error_path")]
    pub error_path: PathBuf,
    /// Validation is skipped when nothing exists at this path.
    #[serde(default = "default_schema_path")]
    pub schema_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            error_path: default_error_path(),
            schema_path: default_schema_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_error_path() -> PathBuf {
    PathBuf::from("error.json")
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("docs/data.schema.json")
}
