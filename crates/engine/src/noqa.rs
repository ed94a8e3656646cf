//! Inline `# noqa` suppression.
//!
//! Follows flake8: a bare `# noqa` silences every code on its line, while
//! `# noqa: MFL000,E501` silences only the listed codes. A listed code also
//! matches any code it is a prefix of, so `# noqa: MFL0` covers `MFL000`.

use regex::Regex;
use std::sync::OnceLock;

fn noqa_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)#\s*noqa(?::[\s]?(?P<codes>(?:[A-Z]+[0-9]+(?:[,\s]+)?)+))?")
            .expect("noqa pattern is valid")
    })
}

/// What a `# noqa` comment on one line suppresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Noqa<'a> {
    All,
    Codes(Vec<&'a str>),
}

impl<'a> Noqa<'a> {
    /// Find the `# noqa` directive on `line`, if any.
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let captures = noqa_regex().captures(line)?;
        Some(captures.name("codes").map_or(Self::All, |codes| {
            Self::Codes(
                codes
                    .as_str()
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|code| !code.is_empty())
                    .collect(),
            )
        }))
    }

    #[must_use]
    pub fn suppresses(&self, code: &str) -> bool {
        match self {
            Self::All => true,
            Self::Codes(codes) => codes.iter().any(|listed| {
                code.get(..listed.len())
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(listed))
            }),
        }
    }
}

/// Whether `line` carries a `# noqa` that covers `code`.
#[must_use]
pub fn is_suppressed(line: &str, code: &str) -> bool {
    Noqa::parse(line).is_some_and(|noqa| noqa.suppresses(code))
}
