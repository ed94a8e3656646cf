// crates/core/src/length.rs
//! Length metric.
//!
//! A function's length is the number of physical lines between its bounds,
//! minus the blank and comment lines the options leave out.

use crate::config::LengthOptions;
use crate::language::{LineKind, SourceFile};
use crate::syntax::FunctionDef;

/// First and last line (inclusive) that count toward `func`'s length.
///
/// The result may be an empty range (`start > end`) when nothing but a
/// docstring is left to count.
#[must_use]
pub fn function_bounds(func: &FunctionDef, options: &LengthOptions) -> (usize, usize) {
    let mut start = func.lineno;
    let mut end = func.end_lineno;

    if !options.include_function_definition {
        start = func.body.first_lineno;
    } else if options.include_decorators
        && let Some(decorator) = func.decorator_lineno
    {
        start = decorator;
    }

    if !options.include_docstring
        && let Some(docstring) = func.body.docstring
    {
        if func.body.statement_count == 1 {
            end = docstring.start - 1;
        } else {
            start = docstring.end + 1;
        }
    }

    (start, end)
}

/// Count the lines in `start..=end`, leaving out blank and comment lines
/// unless the options include them.
#[must_use]
pub fn count_lines(source: &SourceFile, start: usize, end: usize, options: &LengthOptions) -> usize {
    if start == 0 || start > end {
        return 0;
    }

    let mut length = end - start + 1;
    for line in start..=end {
        match source.line_kind(line) {
            Some(LineKind::Blank) if !options.include_empty_lines => length -= 1,
            Some(LineKind::Comment) if !options.include_comment_lines => length -= 1,
            _ => {}
        }
    }
    length
}

#[must_use]
pub fn function_length(func: &FunctionDef, source: &SourceFile, options: &LengthOptions) -> usize {
    let (start, end) = function_bounds(func, options);
    count_lines(source, start, end, options)
}
