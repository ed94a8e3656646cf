// crates/engine/src/lib.rs
use std::path::PathBuf;

pub mod config;
pub mod error;
pub mod filesystem;
pub mod noqa;
pub mod processor;
pub mod settings;
pub mod stats;

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::stats::RunResult;

/// Run the checker over every file the walk options select.
///
/// Files are checked one after another in path order.
///
/// # Errors
///
/// Returns an error for an invalid walk configuration. Entries the walker
/// cannot read and files that cannot be read or scanned are collected in
/// `RunResult::errors`, unless `strict` is set, in which case the first one
/// aborts the run.
pub fn run(config: &Config) -> Result<RunResult> {
    let filesystem::Collected { files, mut errors } = filesystem::collect_files(&config.walk)?;
    log::debug!("Checking {} file(s)", files.len());

    if config.strict && !errors.is_empty() {
        return Err(errors.remove(0).1);
    }
    let mut result = RunResult {
        errors,
        ..RunResult::default()
    };

    for path in files {
        match processor::check_file(&path, config) {
            Ok(report) => result.reports.push(report),
            Err(e) if config.strict => return Err(e),
            Err(e) => {
                log::debug!("{e}");
                result.errors.push((path, e));
            }
        }
    }

    Ok(result)
}

/// Settings discovery for the current working directory.
///
/// # Errors
///
/// Returns an error when the working directory is unavailable or a settings
/// file exists but is invalid.
pub fn discover_settings() -> Result<Option<(PathBuf, settings::FileSettings)>> {
    let cwd = std::env::current_dir().map_err(|e| EngineError::Config(format!(
        "cannot determine working directory: {e}"
    )))?;
    settings::FileSettings::discover(&cwd)
}
