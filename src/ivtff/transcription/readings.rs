//! Escape decoding and uncertain reading resolution (steps 4 and 5)
//!
//! Both run over one logos token stream. Escapes arrive already decoded as
//! [`Token::Escape`]; brackets are then folded into a single reading:
//!
//! - `[a:b]`, `[ab:c:d]`: everything before the first colon
//! - `[ab]`: the first character only (two single-character alternatives)
//! - `[]`: nothing
//!
//! A group closes at the first `]` after its `[`. An unterminated group is kept verbatim.

use crate::ivtff::lexing::tokens::{tokenize, Token};

/// One unit of the token stream as far as bracket resolution is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol<'a> {
    Open,
    Close,
    Colon,
    Text(&'a str),
    Decoded(char),
}

impl<'a> Symbol<'a> {
    fn from_token(token: Token, slice: &'a str) -> Self {
        match token {
            Token::OpenBracket => Symbol::Open,
            Token::CloseBracket => Symbol::Close,
            Token::Colon => Symbol::Colon,
            Token::Escape(ch) => Symbol::Decoded(ch),
            Token::At | Token::Text => Symbol::Text(slice),
        }
    }

    /// Write the symbol back out as literal text
    fn write_to(self, out: &mut String) {
        match self {
            Symbol::Open => out.push('['),
            Symbol::Close => out.push(']'),
            Symbol::Colon => out.push(':'),
            Symbol::Text(text) => out.push_str(text),
            Symbol::Decoded(ch) => out.push(ch),
        }
    }

    fn first_char(self) -> Option<char> {
        match self {
            Symbol::Open => Some('['),
            Symbol::Close => Some(']'),
            Symbol::Colon => Some(':'),
            Symbol::Text(text) => text.chars().next(),
            Symbol::Decoded(ch) => Some(ch),
        }
    }
}

/// Decode escapes and collapse uncertain readings.
pub fn resolve_readings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut group: Option<Vec<Symbol<'_>>> = None;

    for (token, span) in tokenize(text) {
        let symbol = Symbol::from_token(token, &text[span]);
        group = match (group.take(), symbol) {
            (None, Symbol::Open) => Some(Vec::new()),
            (None, literal) => {
                literal.write_to(&mut out);
                None
            }
            (Some(content), Symbol::Close) => {
                write_first_reading(&content, &mut out);
                None
            }
            (Some(mut content), inner) => {
                content.push(inner);
                Some(content)
            }
        };
    }

    if let Some(content) = group {
        out.push('[');
        for symbol in content {
            symbol.write_to(&mut out);
        }
    }

    out
}

fn write_first_reading(content: &[Symbol<'_>], out: &mut String) {
    match content.iter().position(|symbol| *symbol == Symbol::Colon) {
        Some(colon) => {
            for symbol in &content[..colon] {
                symbol.write_to(out);
            }
        }
        None => {
            if let Some(first) = content.iter().find_map(|symbol| symbol.first_char()) {
                out.push(first);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colon_alternatives() {
        assert_eq!(resolve_readings("[o:a]"), "o");
        assert_eq!(resolve_readings("ot[ch:sh]dy"), "otchdy");
        assert_eq!(resolve_readings("[a:b:c]"), "a");
        assert_eq!(resolve_readings("[:b]"), "");
    }

    #[test]
    fn test_shorthand_alternatives() {
        assert_eq!(resolve_readings("[ab]"), "a");
        assert_eq!(resolve_readings("q[ok]ain"), "qoain");
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(resolve_readings("a[]b"), "ab");
    }

    #[test]
    fn test_multiple_groups() {
        assert_eq!(resolve_readings("[o:a]l[ee]dy [ch:sh]"), "oledy ch");
    }

    #[test]
    fn test_group_closes_at_first_bracket() {
        // The inner '[' is content; the group ends at the first ']'
        assert_eq!(resolve_readings("[a[b]c]"), "ac]");
        assert_eq!(resolve_readings("[[x:y]"), "[x");
    }

    #[test]
    fn test_unterminated_group_is_literal() {
        assert_eq!(resolve_readings("ab[c:d"), "ab[c:d");
        assert_eq!(resolve_readings("[o:a]x[y"), "ox[y");
    }

    #[test]
    fn test_stray_close_and_colon_are_literal() {
        assert_eq!(resolve_readings("a]b:c"), "a]b:c");
    }

    #[test]
    fn test_escapes_decode_independently() {
        assert_eq!(resolve_readings("@241;a@241;b@065;"), "ñañbA");
        assert_eq!(resolve_readings("@000;").chars().next(), Some('\0'));
        assert_eq!(resolve_readings("@999;"), "\u{3e7}");
    }

    #[test]
    fn test_decoded_brackets_are_literal() {
        // @091; is '[', @093; is ']', @058; is ':'
        assert_eq!(resolve_readings("@091;a@058;b@093;"), "[a:b]");
        assert_eq!(resolve_readings("[@058;x:y]"), ":x");
    }

    #[test]
    fn test_lone_at_sign() {
        assert_eq!(resolve_readings("a@b"), "a@b");
        assert_eq!(resolve_readings("[@b]"), "@");
    }
}
