// crates/cli/src/presentation.rs
use crate::args::OutputFormat;
use mfl_core::Violation;
use mfl_engine::error::EngineError;
use mfl_engine::stats::RunResult;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// One entry of the JSON output.
#[derive(Debug, Serialize)]
pub struct JsonViolation<'a> {
    pub path: String,
    pub line: usize,
    /// 1-based, like the text output.
    pub column: usize,
    pub code: &'static str,
    pub message: String,
    pub function: &'a str,
    pub length: usize,
    pub max_length: usize,
}

impl<'a> JsonViolation<'a> {
    fn new(path: &Path, violation: &'a Violation) -> Self {
        Self {
            path: path.display().to_string(),
            line: violation.line,
            column: violation.column + 1,
            code: violation.code(),
            message: violation.message(),
            function: &violation.function,
            length: violation.length,
            max_length: violation.max_length,
        }
    }
}

/// Print violations to stdout; in JSON mode file errors go to stderr.
///
/// # Errors
///
/// Returns an error when writing to stdout or stderr fails.
pub fn print_results(result: &RunResult, format: OutputFormat) -> crate::error::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_text(&mut out, result)?,
        OutputFormat::Json => {
            write_json(&mut out, result)?;
            write_errors(&mut io::stderr().lock(), result)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// flake8-style lines, violations and file errors ordered by path.
///
/// # Errors
///
/// Returns an error when writing fails.
pub fn write_text<W: Write>(out: &mut W, result: &RunResult) -> io::Result<()> {
    let mut lines: Vec<(&Path, usize, String)> = Vec::new();

    for report in &result.reports {
        for v in &report.violations {
            lines.push((
                &report.path,
                v.line,
                format!("{}:{}:{}: {}", report.path.display(), v.line, v.column + 1, v.message()),
            ));
        }
    }
    for (path, err) in &result.errors {
        lines.push((path, error_line(err), format_error(path, err)));
    }

    lines.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    for (_, _, line) in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// # Errors
///
/// Returns an error when serialization or writing fails.
pub fn write_json<W: Write>(out: &mut W, result: &RunResult) -> crate::error::Result<()> {
    let entries: Vec<JsonViolation<'_>> = result
        .reports
        .iter()
        .flat_map(|report| {
            report
                .violations
                .iter()
                .map(|v| JsonViolation::new(&report.path, v))
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)?;
    Ok(())
}

/// # Errors
///
/// Returns an error when writing fails.
pub fn write_errors<W: Write>(out: &mut W, result: &RunResult) -> io::Result<()> {
    for (path, err) in &result.errors {
        writeln!(out, "{}", format_error(path, err))?;
    }
    Ok(())
}

fn error_line(err: &EngineError) -> usize {
    match err {
        EngineError::Syntax { source, .. } => source.line,
        _ => 0,
    }
}

/// `path:line:col: E999 SyntaxError: msg` or `path:0:1: E902 msg`.
#[must_use]
pub fn format_error(path: &Path, err: &EngineError) -> String {
    match err {
        EngineError::Syntax { source, .. } => format!(
            "{}:{}:{}: {} SyntaxError: {}",
            path.display(),
            source.line,
            source.column + 1,
            err.code(),
            source.kind
        ),
        EngineError::FileRead { source, .. } => {
            format!("{}:0:1: {} {}", path.display(), err.code(), source)
        }
        EngineError::Walk { source, .. } => {
            format!("{}:0:1: {} {}", path.display(), err.code(), source)
        }
        _ => format!("{}:0:1: {} {}", path.display(), err.code(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfl_core::{SyntaxError, SyntaxErrorKind};
    use mfl_engine::stats::FileReport;
    use std::path::PathBuf;

    fn result() -> RunResult {
        let mut report = FileReport::new(PathBuf::from("pkg/b.py"));
        report.violations.push(Violation {
            function: "handler".into(),
            line: 12,
            column: 4,
            length: 61,
            max_length: 50,
        });
        RunResult {
            reports: vec![report],
            errors: vec![(
                PathBuf::from("pkg/a.py"),
                EngineError::Syntax {
                    path: PathBuf::from("pkg/a.py"),
                    source: SyntaxError::new(SyntaxErrorKind::UnclosedBracket('('), 3, 7),
                },
            )],
        }
    }

    #[test]
    fn test_text_output() {
        let mut out = Vec::new();
        write_text(&mut out, &result()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "pkg/a.py:3:8: E999 SyntaxError: '(' was never closed\n\
             pkg/b.py:12:5: MFL000: Function too long (61 > 50)\n"
        );
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_json(&mut out, &result()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "path": "pkg/b.py",
                "line": 12,
                "column": 5,
                "code": "MFL000",
                "message": "MFL000: Function too long (61 > 50)",
                "function": "handler",
                "length": 61,
                "max_length": 50,
            }])
        );
    }

    #[test]
    fn test_errors_written_separately() {
        let mut out = Vec::new();
        write_errors(&mut out, &result()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "pkg/a.py:3:8: E999 SyntaxError: '(' was never closed\n"
        );
    }

    #[test]
    fn test_walk_error_line() {
        let err = EngineError::Walk {
            path: PathBuf::from("pkg/private"),
            source: ignore::Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied")),
        };
        assert_eq!(
            format_error(Path::new("pkg/private"), &err),
            "pkg/private:0:1: E902 Permission denied"
        );
    }

    #[test]
    fn test_read_error_line() {
        let err = EngineError::FileRead {
            path: PathBuf::from("gone.py"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            format_error(Path::new("gone.py"), &err),
            "gone.py:0:1: E902 No such file or directory"
        );
    }
}
