//! Output formatters for CLI commands
//!
//! Provides structured formatters for the result types that render to
//! multiple formats (Human, JSON, JSONL, Plain, TSV).

mod options;
mod recommendations;

pub use options::OptionsListing;
pub use recommendations::{format_price, format_rating, RecommendationReport, DEFAULT_MAX_COLORS};
