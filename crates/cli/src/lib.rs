// crates/cli/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod parsers;
pub mod presentation;

use crate::args::Args;
use crate::error::Result;
use mfl_engine::stats::RunResult;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check the paths named by `args` and print the findings.
///
/// Returns the process exit status: 0 when nothing was reported (or only
/// violations with `--exit-zero`), 1 otherwise.
///
/// # Errors
///
/// Returns an error for invalid settings or walk configuration, for the
/// first failing file under `--strict`, and for output failures.
pub fn run(args: &Args) -> Result<u8> {
    let settings = match config::load_settings(args)? {
        Some((path, settings)) => {
            log::info!("Using settings from {}", path.display());
            settings
        }
        None => mfl_engine::settings::FileSettings::default(),
    };
    let config = config::build_config(args, &settings)?;
    log::debug!("{config:?}");

    let result = mfl_engine::run(&config)?;
    log::info!(
        "mfl v{VERSION}: {} file(s) checked, {} violation(s), {} error(s)",
        result.files_checked(),
        result.violation_count(),
        result.errors.len()
    );

    presentation::print_results(&result, args.output.format)?;
    Ok(exit_status(&result, args.output.exit_zero))
}

#[must_use]
pub fn exit_status(result: &RunResult, exit_zero: bool) -> u8 {
    if !result.errors.is_empty() || (result.violation_count() > 0 && !exit_zero) {
        1
    } else {
        0
    }
}
