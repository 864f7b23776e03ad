//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod formatters;
pub mod output;
pub mod prompt;

/// cosmorec - Find cosmetic products matching your preferences
#[derive(Parser, Debug)]
#[command(name = "cosmorec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding products_main.csv, product_tags.csv and product_colors.csv
    #[arg(long, global = true, value_name = "DIR")]
    pub data: Option<PathBuf>,

    /// Directory saved recommendations are written to
    #[arg(long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Config file path (default: ~/.config/cosmorec/config.toml, then ./cosmorec.toml)
    #[arg(long, global = true, env = "COSMOREC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (human, json, jsonl, plain, tsv)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Enable machine-readable JSON output (shorthand for --output-format=json)
    #[arg(long, short = 'm', global = true)]
    pub machine: bool,

    /// Force plain output (no colors)
    #[arg(long, global = true)]
    pub plain: bool,

    /// Color mode: auto, always, never
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl Cli {
    /// Effective output format: `--machine`, then `--plain`, then
    /// `--output-format`, then human.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_args(self.machine, self.plain, self.output_format)
    }

    /// Whether styling should be stripped regardless of terminal detection.
    #[must_use]
    pub fn force_plain(&self) -> bool {
        self.plain || self.color == Some(ColorMode::Never) || !self.output_format().use_colors()
    }

    #[must_use]
    pub fn force_color(&self) -> bool {
        self.color == Some(ColorMode::Always)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer questions interactively and get recommendations
    Ask(commands::ask::AskArgs),

    /// Get recommendations from command-line filters
    Recommend(commands::recommend::RecommendArgs),

    /// List the values each filter accepts
    Options(commands::options::OptionsArgs),
}
