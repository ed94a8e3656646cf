use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound on a function's measured length. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct MaxLength(usize);

impl MaxLength {
    pub const DEFAULT: Self = Self(50);

    /// # Errors
    ///
    /// Returns [`ConfigError::MaxLengthTooSmall`] when `value` is 0.
    pub const fn new(value: usize) -> Result<Self, ConfigError> {
        if value < 1 {
            return Err(ConfigError::MaxLengthTooSmall(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for MaxLength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for MaxLength {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MaxLength> for usize {
    fn from(value: MaxLength) -> Self {
        value.0
    }
}

impl core::fmt::Display for MaxLength {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Which lines of a function count toward its length.
///
/// Everything defaults to excluded: only the body's code lines count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct LengthOptions {
    pub max_length: MaxLength,
    /// Count the `def` line(s) up to the first body statement.
    pub include_function_definition: bool,
    pub include_docstring: bool,
    pub include_empty_lines: bool,
    pub include_comment_lines: bool,
    /// Count `@decorator` lines. Only takes effect together with
    /// `include_function_definition`.
    pub include_decorators: bool,
}

impl LengthOptions {
    #[must_use]
    pub fn with_max_length(max_length: MaxLength) -> Self {
        Self {
            max_length,
            ..Self::default()
        }
    }
}
