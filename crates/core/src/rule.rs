// crates/core/src/rule.rs
//! # Function Length Rule
//!
//! Flags every function whose measured length is strictly greater than the
//! configured maximum. One [`Violation`] per offending function, reported at
//! the position of its `def` keyword.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

use crate::config::{LengthOptions, MaxLength};
use crate::error::SyntaxError;
use crate::language::{SourceFile, scan};
use crate::length::function_length;
use crate::syntax::locate_functions;

/// Code reported for over-long functions.
pub const CODE: &str = "MFL000";

/// A function together with its measured length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionLength {
    pub name: String,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl FunctionLength {
    /// The violation for this function, if it is longer than `max_length`.
    #[must_use]
    pub fn check(self, max_length: MaxLength) -> Option<Violation> {
        (self.length > max_length.get()).then(|| Violation {
            function: self.name,
            line: self.line,
            column: self.column,
            length: self.length,
            max_length: max_length.get(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub function: String,
    /// 1-based line of the `def` keyword.
    pub line: usize,
    /// 0-based byte column of the `def` keyword.
    pub column: usize,
    pub length: usize,
    pub max_length: usize,
}

impl Violation {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        CODE
    }

    /// `MFL000: Function too long (60 > 50)`
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{CODE}: Function too long ({} > {})",
            self.length, self.max_length
        )
    }
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{CODE}: Function too long ({} > {})",
            self.length, self.max_length
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionLengthChecker {
    options: LengthOptions,
}

impl FunctionLengthChecker {
    #[must_use]
    pub const fn new(options: LengthOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &LengthOptions {
        &self.options
    }

    /// Measure every function in `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the source cannot be scanned.
    pub fn measure(&self, source: &str) -> Result<Vec<FunctionLength>, SyntaxError> {
        let file = scan(source)?;
        self.measure_parsed(&file)
    }

    /// # Errors
    ///
    /// Returns a [`SyntaxError`] for a malformed function header.
    pub fn measure_parsed(&self, file: &SourceFile) -> Result<Vec<FunctionLength>, SyntaxError> {
        let functions = locate_functions(file)?;
        Ok(functions
            .into_iter()
            .map(|func| FunctionLength {
                length: function_length(&func, file, &self.options),
                line: func.lineno,
                column: func.col_offset,
                name: func.name,
            })
            .collect())
    }

    /// Report every function longer than the maximum.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the source cannot be scanned.
    pub fn check(&self, source: &str) -> Result<Vec<Violation>, SyntaxError> {
        let file = scan(source)?;
        self.check_parsed(&file)
    }

    /// # Errors
    ///
    /// Returns a [`SyntaxError`] for a malformed function header.
    pub fn check_parsed(&self, file: &SourceFile) -> Result<Vec<Violation>, SyntaxError> {
        let max_length = self.options.max_length;
        Ok(self
            .measure_parsed(file)?
            .into_iter()
            .filter_map(|measured| measured.check(max_length))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    fn checker(max: usize) -> FunctionLengthChecker {
        FunctionLengthChecker::new(LengthOptions::with_max_length(MaxLength::new(max).unwrap()))
    }

    const SOURCE: &str = "\
def short():
    return 1


class A:
    def long(self):
        a = 1
        b = 2
        return a + b
";

    #[test]
    fn test_reports_only_functions_over_max() {
        let violations = checker(2).check(SOURCE).unwrap();
        assert_eq!(
            violations,
            alloc::vec![Violation {
                function: "long".into(),
                line: 6,
                column: 4,
                length: 3,
                max_length: 2,
            }]
        );
        assert_eq!(violations[0].code(), "MFL000");
        assert_eq!(violations[0].message(), "MFL000: Function too long (3 > 2)");
        assert_eq!(violations[0].to_string(), violations[0].message());
    }

    #[test]
    fn test_length_equal_to_max_is_allowed() {
        assert!(checker(3).check(SOURCE).unwrap().is_empty());
    }

    #[test]
    fn test_measure_lists_every_function() {
        let measured = checker(50).measure(SOURCE).unwrap();
        let summary: Vec<(&str, usize)> = measured
            .iter()
            .map(|m| (m.name.as_str(), m.length))
            .collect();
        assert_eq!(summary, alloc::vec![("short", 1), ("long", 3)]);
    }

    #[test]
    fn test_syntax_error_is_returned() {
        assert!(checker(1).check("def f(:\n").is_err());
    }

    #[test]
    fn test_default_max_is_fifty() {
        let body: String = (0..50).map(|i| format!("    x{i} = {i}\n")).collect();
        let source = format!("def f():\n{body}");
        let checker = FunctionLengthChecker::default();
        assert!(checker.check(&source).unwrap().is_empty());

        let source = format!("{source}    return x0\n");
        let violations = checker.check(&source).unwrap();
        assert_eq!(violations[0].message(), "MFL000: Function too long (51 > 50)");
    }
}
