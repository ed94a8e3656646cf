use thiserror::Error;

/// Raised when source text cannot be scanned or a function header is malformed.
///
/// `column` is a 0-based byte offset; the message shows it 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} (line {line}, column {})", .column + 1)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    #[must_use]
    pub const fn new(kind: SyntaxErrorKind, line: usize, column: usize) -> Self {
        Self { line, column, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated triple-quoted string literal")]
    UnterminatedTripleQuotedString,

    #[error("unmatched '{0}'")]
    UnmatchedBracket(char),

    #[error("closing parenthesis '{found}' does not match opening parenthesis '{expected}'")]
    MismatchedBracket { expected: char, found: char },

    #[error("'{0}' was never closed")]
    UnclosedBracket(char),

    #[error("expected a function name after 'def'")]
    ExpectedFunctionName,

    #[error("expected ':'")]
    ExpectedColon,

    #[error("expected an indented block after function definition on line {0}")]
    ExpectedIndentedBlock(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("maximum function length must be at least 1, got {0}")]
    MaxLengthTooSmall(usize),
}
