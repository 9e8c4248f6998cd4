pub mod deduplicator;
pub mod feed_builder;
pub mod header_resolver;
pub mod output_writer;
pub mod row_normalizer;
pub mod transform;
