// crates/core/src/language/scanner.rs
//! # Python Scanner
//!
//! Single pass over Python source that produces the physical line
//! classification and the logical lines consumed by [`crate::syntax`].
//!
//! ## Supported Syntax
//!
//! - **Line comments**: `#`
//! - **Strings**: single and triple quoted, any legal prefix
//!   (see [`super::string_prefix`])
//! - **f-strings / t-strings**: `{expr}` replacement fields with nested
//!   strings, brackets, `{{`/`}}` escapes and `:` format specs
//! - **Implicit line joining** inside `()`, `[]`, `{}`
//! - **Explicit line joining** with a trailing backslash
//!
//! ## Line Classification
//!
//! A line that begins inside the literal part of a string is always code.
//! Otherwise a whitespace-only line is blank and a line whose first
//! non-whitespace character is `#` is a comment.

use core::iter::Peekable;
use core::str::CharIndices;

use alloc::string::String;
use alloc::vec::Vec;

use super::string_prefix::parse_prefix;
use super::token::{StringPrefix, Token, TokenKind};
use super::{LineKind, LogicalLine, SourceFile, indent_width};
use crate::error::{SyntaxError, SyntaxErrorKind};

type Chars<'a> = Peekable<CharIndices<'a>>;

/// 文字列リテラルの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StringState {
    quote: char,
    triple: bool,
    prefix: StringPrefix,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Literal text of a string.
    Literal(StringState),
    /// f-string replacement field; `depth` counts brackets opened inside it.
    Field { depth: usize },
    /// Format spec after `:` in a replacement field.
    FormatSpec,
}

#[derive(Debug, Clone, Copy)]
struct OpenBracket {
    ch: char,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// The rest of the line is a comment.
    Comment,
    /// The line ends with a backslash.
    Escaped,
}

/// Scan Python source text.
///
/// Accepts `\n` and `\r\n` line endings and a leading byte order mark.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for unterminated strings and unbalanced
/// brackets; nothing else about the program is validated.
pub fn scan(source: &str) -> Result<SourceFile, SyntaxError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut scanner = Scanner::default();

    for (index, raw) in source.split_inclusive('\n').enumerate() {
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        scanner.scan_line(index + 1, line)?;
    }

    scanner.finish()
}

#[derive(Debug, Default)]
struct Scanner {
    lines: Vec<LineKind>,
    logical: Vec<LogicalLine>,
    pending: Vec<Token>,
    pending_indent: usize,
    brackets: Vec<OpenBracket>,
    scopes: Vec<Scope>,
}

impl Scanner {
    /// 1行を処理する
    fn scan_line(&mut self, line_no: usize, text: &str) -> Result<(), SyntaxError> {
        let kind = self.classify(text);
        self.lines.push(kind);
        if self.pending.is_empty() && self.scopes.is_empty() {
            self.pending_indent = indent_width(text);
        }

        let mut chars = text.char_indices().peekable();
        let mut flow = Flow::Continue;
        while let Some((column, c)) = chars.next() {
            flow = match self.scopes.last().copied() {
                Some(Scope::Literal(state)) => self.literal_char(&mut chars, state, c, line_no),
                Some(Scope::FormatSpec) => self.format_spec_char(&mut chars, c),
                Some(Scope::Field { depth }) => {
                    self.field_char(&mut chars, text, line_no, column, c, depth)
                }
                None => self.code_char(&mut chars, text, line_no, column, c)?,
            };
            if flow != Flow::Continue {
                break;
            }
        }

        self.end_line(flow == Flow::Escaped)
    }

    fn classify(&self, text: &str) -> LineKind {
        if matches!(
            self.scopes.last(),
            Some(Scope::Literal(_) | Scope::FormatSpec)
        ) {
            return LineKind::Code;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with('#') {
            LineKind::Comment
        } else {
            LineKind::Code
        }
    }

    fn end_line(&mut self, escaped: bool) -> Result<(), SyntaxError> {
        let innermost = self.scopes.iter().rev().find_map(|scope| match scope {
            Scope::Literal(state) => Some(*state),
            _ => None,
        });

        if let Some(state) = innermost {
            if !state.triple && !escaped {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnterminatedString,
                    state.line,
                    state.column,
                ));
            }
            return Ok(());
        }

        if !escaped && self.brackets.is_empty() {
            self.flush();
        }
        Ok(())
    }

    /// コードスコープ内の文字処理
    fn code_char(
        &mut self,
        chars: &mut Chars<'_>,
        text: &str,
        line_no: usize,
        column: usize,
        c: char,
    ) -> Result<Flow, SyntaxError> {
        let kind = match c {
            ' ' | '\t' | '\x0c' => return Ok(Flow::Continue),
            '#' => return Ok(Flow::Comment),
            '\\' if chars.peek().is_none() => return Ok(Flow::Escaped),
            '"' | '\'' => {
                self.open_string(chars, line_no, column, c, StringPrefix::default());
                return Ok(Flow::Continue);
            }
            c if is_identifier_start(c) => {
                let (word, prefixed) = read_word(chars, text, column);
                if let Some((prefix, quote)) = prefixed {
                    self.open_string(chars, line_no, column, quote, prefix);
                    return Ok(Flow::Continue);
                }
                TokenKind::Name(String::from(word))
            }
            c if c.is_ascii_digit() => {
                skip_number(chars);
                TokenKind::Number
            }
            '.' if chars.peek().is_some_and(|&(_, n)| n.is_ascii_digit()) => {
                skip_number(chars);
                TokenKind::Number
            }
            '(' | '[' | '{' => {
                self.brackets.push(OpenBracket {
                    ch: c,
                    line: line_no,
                    column,
                });
                TokenKind::Open(c)
            }
            ')' | ']' | '}' => {
                self.close_bracket(c, line_no, column)?;
                TokenKind::Close(c)
            }
            ':' => {
                // `:=`
                if chars.next_if(|&(_, n)| n == '=').is_some() {
                    TokenKind::Other
                } else {
                    TokenKind::Colon
                }
            }
            ';' => TokenKind::Semicolon,
            '@' => {
                // `@=`
                if chars.next_if(|&(_, n)| n == '=').is_some() {
                    TokenKind::Other
                } else {
                    TokenKind::At
                }
            }
            _ => TokenKind::Other,
        };

        self.push_token(kind, line_no, column, line_no);
        Ok(Flow::Continue)
    }

    /// 文字列内の文字を処理
    fn literal_char(
        &mut self,
        chars: &mut Chars<'_>,
        state: StringState,
        c: char,
        line_no: usize,
    ) -> Flow {
        match c {
            '\\' => match chars.peek() {
                None => return Flow::Escaped,
                Some(&(_, '{' | '}')) if state.prefix.has_fields() => {}
                // Raw strings keep the backslash but it still protects a quote.
                Some(&(_, next)) if !state.prefix.raw || next == state.quote || next == '\\' => {
                    chars.next();
                }
                Some(_) => {}
            },
            c if c == state.quote => {
                if !state.triple || closes_triple(chars, state.quote) {
                    self.close_string(line_no);
                }
            }
            '{' if state.prefix.has_fields() => {
                if chars.next_if(|&(_, n)| n == '{').is_none() {
                    self.scopes.push(Scope::Field { depth: 0 });
                }
            }
            '}' if state.prefix.has_fields() => {
                chars.next_if(|&(_, n)| n == '}');
            }
            _ => {}
        }
        Flow::Continue
    }

    /// 補間スコープ内の文字処理
    fn field_char(
        &mut self,
        chars: &mut Chars<'_>,
        text: &str,
        line_no: usize,
        column: usize,
        c: char,
        depth: usize,
    ) -> Flow {
        match c {
            '#' => return Flow::Comment,
            '\\' if chars.peek().is_none() => return Flow::Escaped,
            '"' | '\'' => self.open_string(chars, line_no, column, c, StringPrefix::default()),
            c if is_identifier_start(c) => {
                if let (_, Some((prefix, quote))) = read_word(chars, text, column) {
                    self.open_string(chars, line_no, column, quote, prefix);
                }
            }
            '(' | '[' | '{' => self.set_field_depth(depth + 1),
            ')' | ']' => self.set_field_depth(depth.saturating_sub(1)),
            '}' if depth == 0 => {
                self.scopes.pop();
            }
            '}' => self.set_field_depth(depth - 1),
            ':' if depth == 0 => self.scopes.push(Scope::FormatSpec),
            _ => {}
        }
        Flow::Continue
    }

    fn format_spec_char(&mut self, chars: &mut Chars<'_>, c: char) -> Flow {
        match c {
            '{' => self.scopes.push(Scope::Field { depth: 0 }),
            '}' => {
                // the spec, then the field that owns it
                self.scopes.pop();
                self.scopes.pop();
            }
            '\\' => {
                if chars.next().is_none() {
                    return Flow::Escaped;
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn set_field_depth(&mut self, value: usize) {
        if let Some(Scope::Field { depth }) = self.scopes.last_mut() {
            *depth = value;
        }
    }

    /// 文字列開始の処理 (開始引用符は消費済み)
    fn open_string(
        &mut self,
        chars: &mut Chars<'_>,
        line_no: usize,
        column: usize,
        quote: char,
        prefix: StringPrefix,
    ) {
        let triple = if chars.next_if(|&(_, c)| c == quote).is_some() {
            if chars.next_if(|&(_, c)| c == quote).is_none() {
                // "" or '' - empty string, already complete
                if self.scopes.is_empty() {
                    self.push_token(TokenKind::String(prefix), line_no, column, line_no);
                }
                return;
            }
            true
        } else {
            false
        };

        self.scopes.push(Scope::Literal(StringState {
            quote,
            triple,
            prefix,
            line: line_no,
            column,
        }));
    }

    fn close_string(&mut self, line_no: usize) {
        if let Some(Scope::Literal(state)) = self.scopes.pop()
            && self.scopes.is_empty()
        {
            self.push_token(
                TokenKind::String(state.prefix),
                state.line,
                state.column,
                line_no,
            );
        }
    }

    fn close_bracket(&mut self, c: char, line_no: usize, column: usize) -> Result<(), SyntaxError> {
        let open = self.brackets.pop().ok_or(SyntaxError::new(
            SyntaxErrorKind::UnmatchedBracket(c),
            line_no,
            column,
        ))?;

        if closing_for(open.ch) != c {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MismatchedBracket {
                    expected: open.ch,
                    found: c,
                },
                line_no,
                column,
            ));
        }
        Ok(())
    }

    fn push_token(&mut self, kind: TokenKind, line: usize, column: usize, end_line: usize) {
        self.pending.push(Token {
            kind,
            line,
            column,
            end_line,
        });
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let tokens = core::mem::take(&mut self.pending);
        let start_line = tokens[0].line;
        let end_line = tokens
            .iter()
            .map(|t| t.end_line)
            .max()
            .unwrap_or(start_line);

        self.logical.push(LogicalLine {
            tokens,
            start_line,
            end_line,
            indent: self.pending_indent,
        });
    }

    fn finish(mut self) -> Result<SourceFile, SyntaxError> {
        if let Some(Scope::Literal(state)) = self.scopes.first() {
            let kind = if state.triple {
                SyntaxErrorKind::UnterminatedTripleQuotedString
            } else {
                SyntaxErrorKind::UnterminatedString
            };
            return Err(SyntaxError::new(kind, state.line, state.column));
        }

        if let Some(open) = self.brackets.last() {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnclosedBracket(open.ch),
                open.line,
                open.column,
            ));
        }

        self.flush();
        Ok(SourceFile {
            lines: self.lines,
            logical: self.logical,
        })
    }
}

/// Consume the rest of an identifier that started at `column`.
///
/// When the identifier is a legal string prefix directly followed by a quote,
/// the quote is consumed too and returned with the parsed prefix.
fn read_word<'t>(
    chars: &mut Chars<'_>,
    text: &'t str,
    column: usize,
) -> (&'t str, Option<(StringPrefix, char)>) {
    while chars.next_if(|&(_, c)| is_identifier_char(c)).is_some() {}
    let end = chars.peek().map_or(text.len(), |&(i, _)| i);
    let word = &text[column..end];

    let prefixed = match chars.peek() {
        Some(&(_, quote @ ('"' | '\''))) => parse_prefix(word).map(|prefix| (prefix, quote)),
        _ => None,
    };
    if prefixed.is_some() {
        chars.next();
    }

    (word, prefixed)
}

fn closes_triple(chars: &mut Chars<'_>, quote: char) -> bool {
    chars.next_if(|&(_, c)| c == quote).is_some() && chars.next_if(|&(_, c)| c == quote).is_some()
}

fn skip_number(chars: &mut Chars<'_>) {
    while chars
        .next_if(|&(_, c)| c.is_alphanumeric() || c == '_' || c == '.')
        .is_some()
    {}
}

const fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
