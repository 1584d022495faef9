//! Comma-separated file persistence for the sample table.

pub mod codec;
mod file;

pub use file::CsvFileStore;
