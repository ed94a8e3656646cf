use std::path::PathBuf;

use mfl_core::Violation;
use serde::Serialize;

use crate::error::EngineError;

/// Outcome of checking one file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Functions measured in the file.
    pub functions: usize,
    /// Violations left after `# noqa` suppression.
    pub violations: Vec<Violation>,
    /// Violations silenced by `# noqa`.
    pub suppressed: usize,
}

impl FileReport {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub reports: Vec<FileReport>,
    /// Files that could not be read or scanned, and walk failures.
    pub errors: Vec<(PathBuf, EngineError)>,
}

impl RunResult {
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.reports.iter().map(|r| r.violations.len()).sum()
    }

    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.reports.len() + self.errors.len()
    }

    /// Whether anything was reported: a violation or a file error.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.errors.is_empty() || self.violation_count() > 0
    }
}
