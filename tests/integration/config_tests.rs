//! Config layering as seen by a running session.

use std::path::PathBuf;

use cosmorec::app::AppContext;
use cosmorec::catalog::OptionField;
use cosmorec::cli::OutputFormat;
use cosmorec::config::{Config, PROJECT_CONFIG_FILE};
use tempfile::TempDir;

use super::fixture::fixture_data_dir;

#[test]
fn project_file_is_layered_over_defaults() {
    if std::env::var_os("COSMOREC_CONFIG").is_some() {
        return;
    }
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(PROJECT_CONFIG_FILE),
        "[paths]\noutput_dir = \"saved\"\n\n[display]\ndefault_limit = 3\n",
    )
    .unwrap();

    let config = Config::load(None, temp.path()).unwrap();
    assert_eq!(config.paths.output_dir, PathBuf::from("saved"));
    assert_eq!(config.display.default_limit, 3);
    assert_eq!(config.display.max_colors, 5);
}

#[test]
fn invalid_project_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cosmorec.toml");
    std::fs::write(&path, "[display]\ndefault_limit = \"many\"\n").unwrap();

    assert!(Config::load(Some(&path), temp.path()).is_err());
}

#[test]
fn noise_floor_setting_reaches_option_catalog() {
    let temp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.apply_cli_paths(Some(&fixture_data_dir()), Some(&temp.path().join("out")));

    let strict = AppContext::new(config.clone(), OutputFormat::Json);
    let session = strict.open_session().unwrap();
    assert!(!session.options.get(OptionField::Tags).unwrap().contains("organic"));

    config.matching.noise_floor = 1;
    let loose = AppContext::new(config, OutputFormat::Json);
    let session = loose.open_session().unwrap();
    assert!(session.options.get(OptionField::Tags).unwrap().contains("organic"));
    assert!(session.options.get(OptionField::Colors).unwrap().contains("mauve"));
}
