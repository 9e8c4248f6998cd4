pub mod clock;
pub mod config;
pub mod file_store;
pub mod schema;
pub mod sheets;
