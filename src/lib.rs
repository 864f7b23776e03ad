//! cosmorec - cosmetic product recommendations over a CSV catalog.
//!
//! The catalog is loaded once ([`catalog::load_catalog`]), its legal filter
//! values are derived ([`catalog::OptionCatalog`]), raw user criteria are
//! validated against them ([`query::resolve_criteria`]) and the result is
//! filtered, ranked and truncated ([`query::recommend`]).

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod query;
pub mod sink;
pub mod utils;

pub use error::{RecError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
