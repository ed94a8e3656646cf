//! Settings file support.
//!
//! Settings live either in a dedicated `.mfl.toml` (the whole file) or in the
//! `[tool.mfl]` table of a `pyproject.toml`. Keys match the command line
//! option names:
//!
//! ```toml
//! [tool.mfl]
//! max-function-length = 40
//! mfl-include-docstring = true
//! exclude = ["migrations", "*_pb2.py"]
//! ```

use std::path::{Path, PathBuf};

use mfl_core::MaxLength;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const SETTINGS_FILE: &str = ".mfl.toml";
pub const PYPROJECT_FILE: &str = "pyproject.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSettings {
    /// Maximum allowed function length.
    pub max_function_length: Option<MaxLength>,

    #[serde(rename = "mfl-include-function-definition")]
    pub include_function_definition: Option<bool>,

    #[serde(rename = "mfl-include-docstring")]
    pub include_docstring: Option<bool>,

    #[serde(rename = "mfl-include-empty-lines")]
    pub include_empty_lines: Option<bool>,

    #[serde(rename = "mfl-include-comment-lines")]
    pub include_comment_lines: Option<bool>,

    #[serde(rename = "mfl-include-decorators")]
    pub include_decorators: Option<bool>,

    /// Gitignore-style globs to skip.
    pub exclude: Option<Vec<String>>,

    /// Extensions checked while walking directories.
    pub extensions: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct PyProject {
    tool: Option<Tools>,
}

#[derive(Deserialize)]
struct Tools {
    mfl: Option<FileSettings>,
}

impl FileSettings {
    /// Parse a `.mfl.toml` document.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed documents, unknown keys and a
    /// `max-function-length` below 1.
    pub fn parse(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Parse the `[tool.mfl]` table of a `pyproject.toml` document.
    ///
    /// # Errors
    ///
    /// Same as [`FileSettings::parse`]; other tables are not validated.
    pub fn parse_pyproject(s: &str) -> std::result::Result<Option<Self>, toml::de::Error> {
        let project: PyProject = toml::from_str(s)?;
        Ok(project.tool.and_then(|tools| tools.mfl))
    }

    /// Load settings from an explicit path.
    ///
    /// A file named `pyproject.toml` is read through its `[tool.mfl]` table;
    /// a missing table yields default settings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SettingsRead`] or [`EngineError::SettingsParse`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read(path)?;
        let parsed = if is_pyproject(path) {
            Self::parse_pyproject(&content).map(Option::unwrap_or_default)
        } else {
            Self::parse(&content)
        };
        parsed.map_err(|source| EngineError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find settings by walking up from `start`.
    ///
    /// In each directory `.mfl.toml` wins over `pyproject.toml`; a
    /// `pyproject.toml` without a `[tool.mfl]` table is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when a candidate file exists but cannot be read or
    /// parsed.
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>> {
        for dir in start.ancestors() {
            let dedicated = dir.join(SETTINGS_FILE);
            if dedicated.is_file() {
                let settings = Self::from_file(&dedicated)?;
                return Ok(Some((dedicated, settings)));
            }

            let pyproject = dir.join(PYPROJECT_FILE);
            if pyproject.is_file() {
                let content = read(&pyproject)?;
                let table =
                    Self::parse_pyproject(&content).map_err(|source| EngineError::SettingsParse {
                        path: pyproject.clone(),
                        source,
                    })?;
                if let Some(settings) = table {
                    return Ok(Some((pyproject, settings)));
                }
                log::debug!("{} has no [tool.mfl] table", pyproject.display());
            }
        }
        Ok(None)
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| EngineError::SettingsRead {
        path: path.to_path_buf(),
        source,
    })
}

fn is_pyproject(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == PYPROJECT_FILE)
}
