//! Builds the patrol map's `data.json` feed from a human-edited spreadsheet.
//!
//! The pipeline fetches a grid of cells, resolves drifting header names,
//! normalizes each row in isolation, drops duplicates, sorts for display and
//! writes the document only when its content changed.

// Public API exports
pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod ports;
