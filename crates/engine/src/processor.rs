use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::noqa;
use crate::stats::FileReport;
use mfl_core::{CODE, FunctionLengthChecker, SyntaxError, scan};
use std::path::Path;

/// Read and check a single file.
///
/// # Errors
///
/// Returns [`EngineError::FileRead`] when the file cannot be read as UTF-8
/// and [`EngineError::Syntax`] when it cannot be scanned.
pub fn check_file(path: &Path, config: &Config) -> Result<FileReport> {
    let source = std::fs::read_to_string(path).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    check_source(path, &source, config)
}

/// Check in-memory source as if it were read from `path`.
///
/// # Errors
///
/// Returns [`EngineError::Syntax`] when the source cannot be scanned.
pub fn check_source(path: &Path, source: &str, config: &Config) -> Result<FileReport> {
    let syntax_error = |e: SyntaxError| EngineError::Syntax {
        path: path.to_path_buf(),
        source: e,
    };

    let file = scan(source).map_err(syntax_error)?;
    let measured = FunctionLengthChecker::new(config.length)
        .measure_parsed(&file)
        .map_err(syntax_error)?;

    let mut report = FileReport::new(path.to_path_buf());
    report.functions = measured.len();

    let lines: Vec<&str> = source.lines().collect();
    for function in measured {
        log::debug!(
            "{}:{}: {} is {} lines long",
            path.display(),
            function.line,
            function.name,
            function.length
        );

        let Some(violation) = function.check(config.length.max_length) else {
            continue;
        };

        let line = lines.get(violation.line - 1).copied().unwrap_or_default();
        if !config.disable_noqa && noqa::is_suppressed(line, CODE) {
            log::debug!(
                "{}:{}: {} suppressed by noqa",
                path.display(),
                violation.line,
                violation.function
            );
            report.suppressed += 1;
            continue;
        }
        report.violations.push(violation);
    }

    Ok(report)
}
