use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaValidationError {
    #[error("Failed to read schema {path}")]
    UnreadableSchema { path: String },
    #[error("Schema {path} is not a valid JSON Schema: {details}")]
    InvalidSchema { path: String, details: String },
    #[error("schema violation: {details}")]
    Violation { details: String },
}

pub trait SchemaValidator: Send + Sync {
    fn validate(&self, document: &Value) -> error_stack::Result<(), SchemaValidationError>;
}

/// Used when no schema is configured: every document passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSchemaValidator;

impl SchemaValidator for NoopSchemaValidator {
    fn validate(&self, _document: &Value) -> error_stack::Result<(), SchemaValidationError> {
        Ok(())
    }
}
