//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use dcqc_core::Config;
use dcqc_suite::JsonReport;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::{GlobalArgs, TestSelectionArgs};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: the caller already reported the problem.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Exit code for command-line input that names nothing usable.
pub(crate) const USAGE_EXIT_CODE: u8 = 2;

/// Load `--config` (or `dcqc.yml` from the working directory) and apply it.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let config = match &global.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::discover(Path::new("."))?,
    };
    config.apply().context("Failed to apply config")?;
    Ok(config)
}

/// Required and skipped test names, falling back to the config defaults.
pub(crate) fn test_selection(
    selection: &TestSelectionArgs,
    config: &Config,
) -> (Option<Vec<String>>, Vec<String>) {
    let required = if selection.required_tests.is_empty() {
        config.required_tests.clone()
    } else {
        Some(selection.required_tests.clone())
    };
    let skipped = if selection.skipped_tests.is_empty() {
        config.skipped_tests.clone()
    } else {
        selection.skipped_tests.clone()
    };
    (required, skipped)
}

/// A report writer honoring `--paths-relative-to` or the config default.
pub(crate) fn report_writer(paths_relative_to: Option<&Path>, config: &Config) -> Result<JsonReport> {
    match paths_relative_to.or(config.paths_relative_to.as_deref()) {
        Some(dir) => Ok(JsonReport::new().paths_relative_to(dir)?),
        None => Ok(JsonReport::new()),
    }
}

/// Expand glob patterns into a sorted file list; plain paths pass through.
///
/// A pattern that matches nothing is a usage error.
pub(crate) fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        if !pattern.contains(|c: char| matches!(c, '*' | '?' | '[')) {
            paths.push(PathBuf::from(pattern));
            continue;
        }
        let mut matched: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("Invalid glob pattern: {}", pattern))?
            .filter_map(|entry| entry.ok())
            .collect();
        if matched.is_empty() {
            eprintln!("No files match {}", pattern);
            return Err(ExitCode(USAGE_EXIT_CODE).into());
        }
        matched.sort();
        paths.append(&mut matched);
    }
    Ok(paths)
}
