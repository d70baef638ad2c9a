//! Results aggregator input/output: statistics loading and the
//! consolidated CSV export.

pub mod export;
pub mod loader;

pub use export::{export_summary, load_summary};
pub use loader::load_results;
