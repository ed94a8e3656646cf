use std::path::PathBuf;

use mfl_core::SyntaxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("{}:{}:{}: {}", path.display(), source.line, source.column + 1, source.kind)]
    Syntax {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },

    #[error("Failed to read settings '{path}': {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in '{path}': {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    ExcludePattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    /// flake8-style code for per-file failures: `E999` for syntax errors,
    /// `E902` for everything else.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "E999",
            _ => "E902",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
