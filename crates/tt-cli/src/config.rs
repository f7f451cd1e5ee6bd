//! Processing options from defaults, a TOML file and command-line flags.
//!
//! Precedence, lowest first: built-in defaults, then `--config PATH` (or a
//! `ttc.toml` in the working directory), then individual flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use tt_model::{BatchCodeStyle, MalformedTimePolicy, ProcessingOptions};

/// Config file picked up from the working directory.
pub const CONFIG_FILENAME: &str = "ttc.toml";

/// Flag values that override the config file.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub batch_size: Option<usize>,
    pub batch_code_style: Option<BatchCodeStyle>,
    pub malformed_time: Option<MalformedTimePolicy>,
}

/// Parses options from TOML text. Missing keys keep their defaults.
pub fn parse_options(content: &str) -> Result<ProcessingOptions> {
    let options: ProcessingOptions = toml::from_str(content).context("parse options")?;
    Ok(options)
}

/// Loads options from `explicit`, or from `ttc.toml` in `cwd` when present.
///
/// An explicit file must exist and parse. An implicit file that fails to
/// parse is reported and ignored.
pub fn load_options(explicit: Option<&Path>, cwd: &Path) -> Result<ProcessingOptions> {
    if let Some(path) = explicit {
        let content =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let options =
            parse_options(&content).with_context(|| format!("config {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        return Ok(options);
    }

    let path: PathBuf = cwd.join(CONFIG_FILENAME);
    match fs::read_to_string(&path) {
        Ok(content) => match parse_options(&content) {
            Ok(options) => {
                info!(path = %path.display(), "loaded config");
                Ok(options)
            }
            Err(error) => {
                warn!(path = %path.display(), error = %format!("{error:#}"), "ignoring unreadable config, using defaults");
                Ok(ProcessingOptions::default())
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("no {CONFIG_FILENAME} found, using defaults");
            Ok(ProcessingOptions::default())
        }
        Err(e) => Err(e).with_context(|| format!("read config {}", path.display())),
    }
}

/// Applies flag overrides and validates the result.
pub fn resolve_options(base: ProcessingOptions, overrides: &OptionOverrides) -> Result<ProcessingOptions> {
    let mut options = base;
    if let Some(size) = overrides.batch_size {
        options = options.with_batch_size(size);
    }
    if let Some(style) = overrides.batch_code_style {
        options = options.with_batch_code_style(style);
    }
    if let Some(policy) = overrides.malformed_time {
        options = options.with_malformed_time(policy);
    }
    options.validate().context("invalid options")?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let options = parse_options("batch_size = 25\nbatch_code_style = \"separated\"\n").unwrap();
        assert_eq!(options.batch_size, 25);
        assert_eq!(options.batch_code_style, BatchCodeStyle::Separated);
        assert_eq!(options.header_scan_rows, 15);
        assert_eq!(options.malformed_time, MalformedTimePolicy::Skip);
    }

    #[test]
    fn flags_override_file() {
        let base = parse_options("batch_size = 25\nmalformed_time = \"fail\"\n").unwrap();
        let overrides = OptionOverrides {
            batch_size: Some(10),
            ..OptionOverrides::default()
        };
        let options = resolve_options(base, &overrides).unwrap();
        assert_eq!(options.batch_size, 10);
        assert_eq!(options.malformed_time, MalformedTimePolicy::Fail);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let overrides = OptionOverrides {
            batch_size: Some(0),
            ..OptionOverrides::default()
        };
        assert!(resolve_options(ProcessingOptions::default(), &overrides).is_err());
    }
}
