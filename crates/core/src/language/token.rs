use alloc::string::String;

/// Flags carried by a string literal's prefix (`r`, `b`, `u`, `f`, `t`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct StringPrefix {
    pub raw: bool,
    pub bytes: bool,
    pub format: bool,
    pub template: bool,
    pub unicode: bool,
}

impl StringPrefix {
    /// Whether the literal evaluates to a plain `str` constant.
    #[must_use]
    pub const fn is_plain_str(self) -> bool {
        !self.bytes && !self.format && !self.template
    }

    /// f-strings and t-strings both carry `{...}` replacement fields.
    #[must_use]
    pub const fn has_fields(self) -> bool {
        self.format || self.template
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Name(String),
    Number,
    String(StringPrefix),
    Colon,
    Semicolon,
    At,
    Open(char),
    Close(char),
    /// Any other operator or delimiter.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line the token starts on.
    pub line: usize,
    /// 0-based byte column the token starts at.
    pub column: usize,
    /// Line the token ends on; differs from `line` only for multi-line strings.
    pub end_line: usize,
}

impl Token {
    #[must_use]
    pub fn is_name(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Name(n) if n == name)
    }
}
