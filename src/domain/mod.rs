pub mod coordinate;
pub mod digits;
pub mod document;
pub mod field;
pub mod record;
pub mod sheets;
