// crates/cli/src/error.rs
use mfl_engine::error::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    /// Process exit status: 1 for a file that could not be checked in
    /// strict mode, 2 for configuration problems.
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        match self {
            Self::Engine(EngineError::FileRead { .. } | EngineError::Syntax { .. }) => 1,
            _ => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
