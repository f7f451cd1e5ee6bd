//! Integration tests for option loading.

use std::fs;

use tempfile::tempdir;

use tt_cli::config::{CONFIG_FILENAME, OptionOverrides, load_options, resolve_options};
use tt_model::{BatchCodeStyle, MalformedTimePolicy, ProcessingOptions};

#[test]
fn test_missing_implicit_config_uses_defaults() {
    let dir = tempdir().unwrap();
    let options = load_options(None, dir.path()).unwrap();
    assert_eq!(options, ProcessingOptions::default());
}

#[test]
fn test_implicit_config_is_picked_up() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILENAME),
        "batch_size = 12\nmalformed_time = \"fail\"\n",
    )
    .unwrap();

    let options = load_options(None, dir.path()).unwrap();

    assert_eq!(options.batch_size, 12);
    assert_eq!(options.malformed_time, MalformedTimePolicy::Fail);
    assert_eq!(options.batch_code_style, BatchCodeStyle::Concatenated);
}

#[test]
fn test_unparseable_implicit_config_falls_back() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILENAME), "batch_size = \"many\"\n").unwrap();

    let options = load_options(None, dir.path()).unwrap();

    assert_eq!(options, ProcessingOptions::default());
}

#[test]
fn test_explicit_config_errors_are_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let error = load_options(Some(&missing), dir.path()).unwrap_err();
    assert!(format!("{error:#}").contains("absent.toml"));

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "batch_size = [").unwrap();
    assert!(load_options(Some(&broken), dir.path()).is_err());
}

#[test]
fn test_explicit_config_wins_over_implicit() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILENAME), "batch_size = 12\n").unwrap();
    let explicit = dir.path().join("term2.toml");
    fs::write(&explicit, "batch_size = 40\nbatch_code_style = \"separated\"\n").unwrap();

    let options = load_options(Some(&explicit), dir.path()).unwrap();

    assert_eq!(options.batch_size, 40);
    assert_eq!(options.batch_code_style, BatchCodeStyle::Separated);
}

#[test]
fn test_flags_override_file_values() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILENAME), "batch_size = 12\n").unwrap();
    let base = load_options(None, dir.path()).unwrap();

    let overrides = OptionOverrides {
        batch_size: Some(5),
        batch_code_style: Some(BatchCodeStyle::Separated),
        ..OptionOverrides::default()
    };
    let options = resolve_options(base, &overrides).unwrap();

    assert_eq!(options.batch_size, 5);
    assert_eq!(options.batch_code_style, BatchCodeStyle::Separated);
    assert_eq!(options.malformed_time, MalformedTimePolicy::Skip);
}
