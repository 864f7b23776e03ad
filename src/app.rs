//! Per-invocation application state shared by every command.

use std::path::Path;

use crate::catalog::{load_catalog, Catalog, LoadReport, OptionCatalog};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::utils::fs::ensure_dir;

pub struct AppContext {
    pub config: Config,
    pub output_format: OutputFormat,
}

/// A loaded catalog with its derived option sets.
pub struct Session {
    pub catalog: Catalog,
    pub options: OptionCatalog,
    pub report: LoadReport,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut config = Config::load(cli.config.as_deref(), &cwd)?;
        config.apply_cli_paths(cli.data.as_deref(), cli.output.as_deref());
        config.validate()?;

        if cli.force_color() {
            console::set_colors_enabled(true);
            colored::control::set_override(true);
        } else if cli.force_plain() {
            console::set_colors_enabled(false);
            colored::control::set_override(false);
        }

        Ok(Self::new(config, cli.output_format()))
    }

    pub const fn new(config: Config, output_format: OutputFormat) -> Self {
        Self {
            config,
            output_format,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.paths.data_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.paths.output_dir
    }

    /// Create the data and output directories, then load the catalog and
    /// derive its option sets.
    pub fn open_session(&self) -> Result<Session> {
        ensure_dir(self.data_dir())?;
        ensure_dir(self.output_dir())?;

        let (catalog, report) = load_catalog(self.data_dir())?;
        let options = OptionCatalog::build(&catalog, self.config.matching.noise_floor);
        Ok(Session {
            catalog,
            options,
            report,
        })
    }
}
