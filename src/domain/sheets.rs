pub mod raw_grid;
pub mod row;
