use std::{path::Path, sync::Arc};

use error_stack::{report, ResultExt};
use jsonschema::Validator;
use serde_json::Value;
use tracing::instrument;

use crate::ports::schema_validator::{NoopSchemaValidator, SchemaValidationError, SchemaValidator};

/// Draft 2020-12 validator compiled from a schema document.
pub struct JsonSchemaValidator {
    validator: Validator,
}

impl std::fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSchemaValidator").finish_non_exhaustive()
    }
}

impl JsonSchemaValidator {
    pub fn from_value(
        schema: &Value,
        origin: &str,
    ) -> error_stack::Result<Self, SchemaValidationError> {
        let validator = jsonschema::draft202012::new(schema).map_err(|error| {
            report!(SchemaValidationError::InvalidSchema {
                path: origin.to_string(),
                details: error.to_string(),
            })
        })?;
        Ok(Self { validator })
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, document: &Value) -> error_stack::Result<(), SchemaValidationError> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(document)
            .map(|error| format!("{}: {}", location(&error.instance_path.to_string()), error))
            .collect();

        if violations.is_empty() {
            return Ok(());
        }

        Err(report!(SchemaValidationError::Violation {
            details: violations.join("; "),
        }))
    }
}

fn location(pointer: &str) -> &str {
    if pointer.is_empty() {
        "/"
    } else {
        pointer
    }
}

/// Picks the validator for `path`: the no-op validator when the file does not
/// exist, otherwise the compiled schema.
#[instrument]
pub fn load_validator(
    path: &Path,
) -> error_stack::Result<Arc<dyn SchemaValidator>, SchemaValidationError> {
    let origin = path.display().to_string();

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(schema = %origin, "no schema found, skipping validation");
            return Ok(Arc::new(NoopSchemaValidator));
        }
        Err(error) => {
            return Err(report!(error)).change_context(SchemaValidationError::UnreadableSchema {
                path: origin,
            })
        }
    };

    let schema: Value = serde_json::from_str(&text).map_err(|error| {
        report!(SchemaValidationError::InvalidSchema {
            path: origin.clone(),
            details: error.to_string(),
        })
    })?;

    tracing::debug!(schema = %origin, "validating against schema");
    Ok(Arc::new(JsonSchemaValidator::from_value(&schema, &origin)?))
}
