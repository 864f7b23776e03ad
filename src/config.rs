use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::options::DEFAULT_NOISE_FLOOR;
use crate::cli::formatters::DEFAULT_MAX_COLORS;
use crate::error::{RecError, Result};
use crate::matcher::DEFAULT_FUZZY_CUTOFF;
use crate::query::DEFAULT_LIMIT;

/// File name looked up in the working directory for project-level settings.
pub const PROJECT_CONFIG_FILE: &str = "cosmorec.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration layered as defaults, global file, project file, then
    /// environment overrides. An explicit path (flag or `COSMOREC_CONFIG`)
    /// replaces the global/project pair.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("COSMOREC_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(RecError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_root.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("cosmorec/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| RecError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| RecError::Config(format!("parse config {}: {err}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.paths {
            self.paths.merge(patch);
        }
        if let Some(patch) = patch.matching {
            self.matching.merge(patch);
        }
        if let Some(patch) = patch.display {
            self.display.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("COSMOREC_DATA_DIR") {
            self.paths.data_dir = PathBuf::from(value);
        }
        if let Some(value) = env_string("COSMOREC_OUTPUT_DIR") {
            self.paths.output_dir = PathBuf::from(value);
        }
        if let Some(value) = env_f64("COSMOREC_FUZZY_CUTOFF")? {
            self.matching.fuzzy_cutoff = value;
        }
        if let Some(value) = env_usize("COSMOREC_NOISE_FLOOR")? {
            self.matching.noise_floor = value;
        }
        if let Some(value) = env_i64("COSMOREC_DEFAULT_LIMIT")? {
            self.display.default_limit = value;
        }
        if let Some(value) = env_usize("COSMOREC_MAX_COLORS")? {
            self.display.max_colors = value;
        }
        Ok(())
    }

    /// Override the table/output directories from command-line flags.
    pub fn apply_cli_paths(&mut self, data_dir: Option<&Path>, output_dir: Option<&Path>) {
        if let Some(dir) = data_dir {
            self.paths.data_dir = dir.to_path_buf();
        }
        if let Some(dir) = output_dir {
            self.paths.output_dir = dir.to_path_buf();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.paths.data_dir.as_os_str().is_empty() {
            return Err(RecError::MissingConfig("paths.data_dir".to_string()));
        }
        if self.paths.output_dir.as_os_str().is_empty() {
            return Err(RecError::MissingConfig("paths.output_dir".to_string()));
        }
        let cutoff = self.matching.fuzzy_cutoff;
        if !(cutoff > 0.0 && cutoff <= 1.0) {
            return Err(RecError::Config(format!(
                "matching.fuzzy_cutoff must be in (0, 1], got {cutoff}"
            )));
        }
        if self.matching.noise_floor == 0 {
            return Err(RecError::Config(
                "matching.noise_floor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding products_main.csv and the optional relation tables
    pub data_dir: PathBuf,
    /// Directory where saved recommendation files are written
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("recommendations"),
        }
    }
}

impl PathsConfig {
    fn merge(&mut self, patch: PathsPatch) {
        if let Some(value) = patch.data_dir {
            self.data_dir = value;
        }
        if let Some(value) = patch.output_dir {
            self.output_dir = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity for a close-match suggestion
    pub fuzzy_cutoff: f64,
    /// Minimum occurrences for a tag or color to become a legal option
    pub noise_floor: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
            noise_floor: DEFAULT_NOISE_FLOOR,
        }
    }
}

impl MatchingConfig {
    fn merge(&mut self, patch: MatchingPatch) {
        if let Some(value) = patch.fuzzy_cutoff {
            self.fuzzy_cutoff = value;
        }
        if let Some(value) = patch.noise_floor {
            self.noise_floor = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Result count used when none is given; zero or negative means all
    pub default_limit: i64,
    /// Colors listed per product before the overflow line
    pub max_colors: usize,
    /// Values shown per field by `options` before truncating
    pub options_preview: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_colors: DEFAULT_MAX_COLORS,
            options_preview: 10,
        }
    }
}

impl DisplayConfig {
    fn merge(&mut self, patch: DisplayPatch) {
        if let Some(value) = patch.default_limit {
            self.default_limit = value;
        }
        if let Some(value) = patch.max_colors {
            self.max_colors = value;
        }
        if let Some(value) = patch.options_preview {
            self.options_preview = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub paths: Option<PathsPatch>,
    pub matching: Option<MatchingPatch>,
    pub display: Option<DisplayPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PathsPatch {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MatchingPatch {
    pub fuzzy_cutoff: Option<f64>,
    pub noise_floor: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DisplayPatch {
    pub default_limit: Option<i64>,
    pub max_colors: Option<usize>,
    pub options_preview: Option<usize>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match env_string(key) {
        Some(value) => value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|err| RecError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match env_string(key) {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|err| RecError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

fn env_i64(key: &str) -> Result<Option<i64>> {
    match env_string(key) {
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|err| RecError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}
