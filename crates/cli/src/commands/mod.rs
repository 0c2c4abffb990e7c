//! CLI commands for the currency bias analyzer.

pub mod analyze;
pub mod export;
pub mod history;
pub mod regions;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use export::{run_export, ExportArgs};
pub use history::{run_history, HistoryArgs};
pub use regions::{run_regions, RegionsArgs};
