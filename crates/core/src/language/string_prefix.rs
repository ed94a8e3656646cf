// crates/core/src/language/string_prefix.rs
//! 文字列プレフィックスの解析
//!
//! Python の文字列プレフィックスを考慮:
//! - f-string: `f"..."`, `F"..."`
//! - t-string: `t"..."`
//! - Unicode: `u"..."`, `U"..."`
//! - Raw: `r"..."`, `R"..."`
//! - Bytes: `b"..."`, `B"..."`
//! - 複合: `fr"..."`, `rf"..."`, `br"..."`, `rb"..."` など

use super::token::StringPrefix;

/// Python の文字列プレフィックス文字かどうかを判定
#[inline]
#[must_use]
pub const fn is_prefix_char(c: char) -> bool {
    matches!(c, 'f' | 'F' | 't' | 'T' | 'u' | 'U' | 'r' | 'R' | 'b' | 'B')
}

/// Parse an identifier that sits directly in front of a quote.
///
/// Returns `None` when `ident` is not a legal prefix, in which case it is an
/// ordinary name followed by a string (`print"x"` is two tokens).
#[must_use]
pub fn parse_prefix(ident: &str) -> Option<StringPrefix> {
    if ident.is_empty() || ident.len() > 2 {
        return None;
    }

    let mut prefix = StringPrefix::default();
    for c in ident.chars() {
        if !is_prefix_char(c) {
            return None;
        }
        let flag = match c.to_ascii_lowercase() {
            'r' => &mut prefix.raw,
            'b' => &mut prefix.bytes,
            'f' => &mut prefix.format,
            't' => &mut prefix.template,
            _ => &mut prefix.unicode,
        };
        if *flag {
            return None;
        }
        *flag = true;
    }

    let kinds = [prefix.bytes, prefix.format, prefix.template, prefix.unicode]
        .iter()
        .filter(|&&set| set)
        .count();
    if kinds > 1 || (prefix.unicode && prefix.raw) {
        return None;
    }

    Some(prefix)
}
