pub mod clock;
pub mod document_store;
pub mod grid_source;
pub mod schema_validator;
