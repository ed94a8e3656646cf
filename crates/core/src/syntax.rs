// crates/core/src/syntax.rs
//! # Function Locator
//!
//! Finds every `def` / `async def` in a scanned file and recovers the line
//! facts the length metric needs: where the definition starts and ends, where
//! its body starts, how many statements the body has, whether it opens with a
//! docstring and where its decorators begin.
//!
//! Block structure comes from indentation alone. Each logical line whose
//! first token is `def` (or `async def`) is a header; the logical lines after
//! it that are indented deeper form its body.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::language::{LogicalLine, SourceFile, Token, TokenKind};

/// Inclusive range of physical lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBody {
    /// Line of the first statement. For a decorated statement this is the
    /// line of its `def`/`class` keyword.
    pub first_lineno: usize,
    /// Top-level statements in the body.
    pub statement_count: usize,
    pub docstring: Option<LineSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub is_async: bool,
    /// Line of the `def` (or `async`) keyword.
    pub lineno: usize,
    /// 0-based byte column of that keyword.
    pub col_offset: usize,
    /// Last line of the last body statement.
    pub end_lineno: usize,
    /// First line of the decorators directly above the definition.
    pub decorator_lineno: Option<usize>,
    pub body: FunctionBody,
}

/// Locate every function definition, ordered by position.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for a malformed function header: `def` without
/// a name, a header without its `:` or a block header with no indented body.
pub fn locate_functions(source: &SourceFile) -> Result<Vec<FunctionDef>, SyntaxError> {
    let lines = source.logical.as_slice();
    let mut functions = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if let Some(header) = Header::parse(line)? {
            functions.push(header.into_function(lines, index)?);
        }
    }

    Ok(functions)
}

struct Header<'a> {
    name: &'a str,
    is_async: bool,
    keyword: &'a Token,
    /// Index of the header colon within the line's tokens.
    colon: usize,
}

impl<'a> Header<'a> {
    fn parse(line: &'a LogicalLine) -> Result<Option<Self>, SyntaxError> {
        let tokens = line.tokens.as_slice();
        let def_index = match tokens {
            [first, ..] if first.is_name("def") => 0,
            [first, second, ..] if first.is_name("async") && second.is_name("def") => 1,
            _ => return Ok(None),
        };
        let keyword = &tokens[0];
        let def = &tokens[def_index];

        let name = match tokens.get(def_index + 1) {
            Some(Token {
                kind: TokenKind::Name(name),
                ..
            }) => name.as_str(),
            _ => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::ExpectedFunctionName,
                    def.line,
                    def.column,
                ));
            }
        };

        let colon = header_colon(tokens, def_index + 2).ok_or_else(|| {
            let last = tokens.last().unwrap_or(def);
            SyntaxError::new(SyntaxErrorKind::ExpectedColon, last.line, last.column)
        })?;

        Ok(Some(Self {
            name,
            is_async: def_index == 1,
            keyword,
            colon,
        }))
    }

    fn into_function(
        self,
        lines: &[LogicalLine],
        index: usize,
    ) -> Result<FunctionDef, SyntaxError> {
        let line = &lines[index];
        let statements = split_statements(&line.tokens[self.colon + 1..]);

        let (body, end_lineno) = if statements.is_empty() {
            block_body(lines, index)?
        } else {
            (inline_body(&statements), line.end_line)
        };

        Ok(FunctionDef {
            name: String::from(self.name),
            is_async: self.is_async,
            lineno: self.keyword.line,
            col_offset: self.keyword.column,
            end_lineno,
            decorator_lineno: decorator_start(lines, index),
            body,
        })
    }
}

/// First `:` at bracket depth 0, starting from token `from`.
fn header_colon(tokens: &[Token], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(from) {
        match token.kind {
            TokenKind::Open(_) => depth += 1,
            TokenKind::Close(_) => depth = depth.saturating_sub(1),
            TokenKind::Colon if depth == 0 => return Some(index),
            _ => {}
        }
    }
    None
}

/// `def f(): a; b`
fn inline_body(statements: &[&[Token]]) -> FunctionBody {
    let first = statements[0];
    FunctionBody {
        first_lineno: first[0].line,
        statement_count: statements.len(),
        docstring: docstring_span(first),
    }
}

fn block_body(lines: &[LogicalLine], index: usize) -> Result<(FunctionBody, usize), SyntaxError> {
    let header = &lines[index];
    let body: Vec<&LogicalLine> = lines[index + 1..]
        .iter()
        .take_while(|line| line.indent > header.indent)
        .collect();

    let (Some(first), Some(last)) = (body.first(), body.last()) else {
        return Err(SyntaxError::new(
            SyntaxErrorKind::ExpectedIndentedBlock(header.start_line),
            header.end_line + 1,
            0,
        ));
    };

    let top: Vec<&LogicalLine> = body
        .iter()
        .copied()
        .filter(|line| line.indent == first.indent)
        .collect();

    // Decorators belong to the statement below them.
    let first_lineno = top
        .iter()
        .find(|line| !starts_with_at(line))
        .map_or(first.start_line, |line| line.start_line);

    let docstring = if starts_with_at(first) {
        None
    } else {
        split_statements(&first.tokens)
            .first()
            .and_then(|statement| docstring_span(statement))
    };

    let statement_count = top.iter().map(|line| statement_count(line)).sum();

    Ok((
        FunctionBody {
            first_lineno,
            statement_count,
            docstring,
        },
        last.end_line,
    ))
}

fn decorator_start(lines: &[LogicalLine], index: usize) -> Option<usize> {
    let indent = lines[index].indent;
    lines[..index]
        .iter()
        .rev()
        .take_while(|line| line.indent == indent && starts_with_at(line))
        .last()
        .map(|line| line.start_line)
}

fn starts_with_at(line: &LogicalLine) -> bool {
    line.first().is_some_and(|t| t.kind == TokenKind::At)
}

const COMPOUND_KEYWORDS: &[&str] = &[
    "if", "for", "while", "try", "with", "def", "class", "async",
];

/// Clauses that continue the compound statement above them.
const CLAUSE_KEYWORDS: &[&str] = &["elif", "else", "except", "finally"];

fn statement_count(line: &LogicalLine) -> usize {
    let Some(first) = line.first() else {
        return 0;
    };
    match &first.kind {
        TokenKind::At => 0,
        TokenKind::Name(name) if CLAUSE_KEYWORDS.contains(&name.as_str()) => 0,
        TokenKind::Name(name) if COMPOUND_KEYWORDS.contains(&name.as_str()) => 1,
        TokenKind::Name(name) if (name == "match" || name == "case") && is_soft_keyword_header(line) => 1,
        _ => split_statements(&line.tokens).len(),
    }
}

/// `match x:` opens a block; `match = 1` and `match: int = 1` do not.
fn is_soft_keyword_header(line: &LogicalLine) -> bool {
    let tokens = line.tokens.as_slice();
    if matches!(
        tokens.get(1).map(|t| &t.kind),
        None | Some(TokenKind::Other | TokenKind::Colon)
    ) {
        return false;
    }
    header_colon(tokens, 1).is_some_and(|colon| colon + 1 == tokens.len())
}

fn split_statements(tokens: &[Token]) -> Vec<&[Token]> {
    tokens
        .split(|t| t.kind == TokenKind::Semicolon)
        .filter(|statement| !statement.is_empty())
        .collect()
}

/// Span of `statement` when it is a bare `str` literal, possibly implicitly
/// concatenated and wrapped in parentheses.
fn docstring_span(statement: &[Token]) -> Option<LineSpan> {
    let (first, last) = (statement.first()?, statement.last()?);

    let mut inner = statement;
    while let [open, rest @ .., close] = inner
        && open.kind == TokenKind::Open('(')
        && close.kind == TokenKind::Close(')')
    {
        inner = rest;
    }

    let is_docstring = !inner.is_empty()
        && inner
            .iter()
            .all(|t| matches!(t.kind, TokenKind::String(prefix) if prefix.is_plain_str()));
    is_docstring.then_some(LineSpan {
        start: first.line,
        end: last.end_line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::scan;
    use alloc::vec;

    fn locate(source: &str) -> Vec<FunctionDef> {
        locate_functions(&scan(source).unwrap()).unwrap()
    }

    fn only(source: &str) -> FunctionDef {
        let mut functions = locate(source);
        assert_eq!(functions.len(), 1);
        functions.remove(0)
    }

    fn locate_err(source: &str) -> SyntaxErrorKind {
        locate_functions(&scan(source).unwrap()).unwrap_err().kind
    }

    #[test]
    fn test_simple_function() {
        let func = only("def f(x):\n    y = x\n\n    # done\n    return y\n\n# trailing\n\nz = 1\n");
        assert_eq!(func.name, "f");
        assert!(!func.is_async);
        assert_eq!((func.lineno, func.col_offset), (1, 0));
        assert_eq!(func.end_lineno, 5);
        assert_eq!(func.body.first_lineno, 2);
        assert_eq!(func.body.statement_count, 2);
        assert_eq!(func.body.docstring, None);
        assert_eq!(func.decorator_lineno, None);
    }

    #[test]
    fn test_methods_and_nested_functions() {
        let source = "\
class A:
    async def m(self):
        def inner():
            pass
        return inner
";
        let functions = locate(source);
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].name, "m");
        assert!(functions[0].is_async);
        assert_eq!((functions[0].lineno, functions[0].col_offset), (2, 4));
        assert_eq!(functions[0].end_lineno, 5);
        assert_eq!(functions[0].body.statement_count, 2);
        assert_eq!(functions[1].name, "inner");
        assert_eq!((functions[1].lineno, functions[1].col_offset), (3, 8));
        assert_eq!(functions[1].end_lineno, 4);
    }

    #[test]
    fn test_multiline_signature() {
        let source = "\
def f(
    a: int = 1,
    b=lambda x: x,
) -> dict[str, int]:
    return {}
";
        let func = only(source);
        assert_eq!(func.lineno, 1);
        assert_eq!(func.body.first_lineno, 5);
        assert_eq!(func.end_lineno, 5);
    }

    #[test]
    fn test_inline_body() {
        let func = only("def f(): return 1\n");
        assert_eq!(func.body.first_lineno, 1);
        assert_eq!(func.end_lineno, 1);
        assert_eq!(func.body.statement_count, 1);

        let func = only("def f(): \"doc\"; return 1\n");
        assert_eq!(func.body.statement_count, 2);
        assert_eq!(func.body.docstring, Some(LineSpan { start: 1, end: 1 }));
    }

    #[test]
    fn test_decorators() {
        let source = "\
@first
# comment
@second(
    arg,
)
def f():
    @inner
    def g():
        pass
    return g
";
        let functions = locate(source);
        assert_eq!(functions[0].decorator_lineno, Some(1));
        assert_eq!(functions[0].lineno, 6);
        assert_eq!(functions[0].body.first_lineno, 8);
        assert_eq!(functions[0].body.statement_count, 2);
        assert_eq!(functions[1].decorator_lineno, Some(7));
    }

    #[test]
    fn test_docstrings() {
        let doc = |source: &str| only(source).body.docstring;

        assert_eq!(
            doc("def f():\n    \"\"\"Doc.\n\n    More.\n    \"\"\"\n    pass\n"),
            Some(LineSpan { start: 2, end: 5 })
        );
        assert_eq!(
            doc("def f():\n    r'a' u'b'\n"),
            Some(LineSpan { start: 2, end: 2 })
        );
        assert_eq!(
            doc("def f():\n    (\n        'a'\n        'b'\n    )\n"),
            Some(LineSpan { start: 2, end: 5 })
        );
        assert_eq!(doc("def f():\n    b'bytes'\n"), None);
        assert_eq!(doc("def f():\n    f'{x}'\n"), None);
        assert_eq!(doc("def f():\n    'a' + x\n"), None);
        assert_eq!(doc("def f():\n    'a'.join(x)\n"), None);
        assert_eq!(doc("def f():\n    ('a')('b')\n"), None);
        assert_eq!(doc("def f():\n    x = 'a'\n"), None);
    }

    #[test]
    fn test_compound_statements_count_once() {
        let source = "\
def f(x):
    if x:
        a = 1; b = 2
    elif not x:
        pass
    else:
        pass
    try:
        pass
    except ValueError:
        pass
    finally:
        pass
    a = 1; b = 2;
";
        assert_eq!(only(source).body.statement_count, 4);
    }

    #[test]
    fn test_match_soft_keyword() {
        let source = "\
def f(x):
    match x:
        case 1:
            pass
    match (x):
        case _:
            pass
";
        assert_eq!(only(source).body.statement_count, 2);

        let source = "def f():\n    match: int = 1; match = 2\n    match.x(1)\n";
        assert_eq!(only(source).body.statement_count, 3);
    }

    #[test]
    fn test_def_inside_string_is_ignored() {
        assert!(locate("x = \"\"\"\ndef f():\n    pass\n\"\"\"\n").is_empty());
    }

    #[test]
    fn test_order_follows_position() {
        let functions = locate("def a():\n    def b(): pass\ndef c(): pass\n");
        let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_malformed_headers() {
        assert_eq!(locate_err("def (x):\n    pass\n"), SyntaxErrorKind::ExpectedFunctionName);
        assert_eq!(locate_err("def f(x)\n    pass\n"), SyntaxErrorKind::ExpectedColon);
        assert_eq!(locate_err("def f():\n"), SyntaxErrorKind::ExpectedIndentedBlock(1));
        assert_eq!(
            locate_err("def f():\nx = 1\n"),
            SyntaxErrorKind::ExpectedIndentedBlock(1)
        );
    }
}
