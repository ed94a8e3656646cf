// crates/core/src/language/mod.rs
//! Python ソース走査
//!
//! The scanner recovers just enough of Python's token stream to answer the
//! questions the length rule asks: where logical lines start and end, how
//! deep they are indented, and which physical lines are blank or comments.

pub mod scanner;
pub mod string_prefix;
pub mod token;

pub use scanner::scan;
pub use token::{StringPrefix, Token, TokenKind};

use alloc::vec::Vec;

/// Classification of one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Whitespace only, outside any string literal.
    Blank,
    /// First non-whitespace character is `#`, outside any string literal.
    Comment,
    /// Anything else, including every line that starts inside a string.
    Code,
}

/// One logical line: the tokens between two `NEWLINE`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub tokens: Vec<Token>,
    /// Line of the first token (1-based).
    pub start_line: usize,
    /// Line on which the last token ends.
    pub end_line: usize,
    /// Width of the leading whitespace of `start_line`.
    pub indent: usize,
}

impl LogicalLine {
    #[must_use]
    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    #[must_use]
    pub fn starts_with_name(&self, name: &str) -> bool {
        self.first().is_some_and(|t| t.is_name(name))
    }
}

/// Scanned Python source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// `lines[n - 1]` classifies physical line `n`.
    pub lines: Vec<LineKind>,
    pub logical: Vec<LogicalLine>,
}

impl SourceFile {
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Kind of the 1-based physical line `line`, if it exists.
    #[must_use]
    pub fn line_kind(&self, line: usize) -> Option<LineKind> {
        line.checked_sub(1).and_then(|i| self.lines.get(i)).copied()
    }
}

/// Indentation width of `line`, following the tokenizer's rules:
/// tabs advance to the next multiple of 8 and a form feed resets the count.
#[must_use]
pub fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width = (width / 8 + 1) * 8,
            '\x0c' => width = 0,
            _ => break,
        }
    }
    width
}
