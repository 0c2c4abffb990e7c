//! Snapshot storage and export for the fx-bias macro analyzer.
//!
//! This crate provides:
//! - SQLite-backed snapshot store implementing the core store trait
//! - CSV export of stored snapshot rows

pub mod export;
pub mod store;

// Re-export commonly used types
pub use export::CsvExporter;
pub use store::SqliteStore;
