//! Token definitions for locus bodies
//!
//! Once formatting marks, inline comments and word separators have been dealt with, what
//! remains of a locus body is plain transliteration text with two kinds of structure left:
//! numeric character escapes (`@NNN;`) and uncertain reading brackets (`[a:b]`, `[ab]`).
//! The tokens are defined using the logos derive macro.
//!
//! Escapes are decoded while tokenizing. The resulting character travels inside
//! [`Token::Escape`], which means a decoded `[`, `]` or `:` can never be mistaken for
//! bracket syntax later on.

use logos::Logos;
use std::ops::Range;

/// All possible tokens in a cleaned locus body
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// `@NNN;`, carrying the character whose code point is NNN
    #[regex(r"@[0-9][0-9][0-9];", decode_escape)]
    Escape(char),

    /// An `@` that does not start a complete escape
    #[token("@")]
    At,

    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(":")]
    Colon,

    // Text content (catch-all for non-special characters)
    #[regex(r"[^@\[\]:]+")]
    Text,
}

fn decode_escape(lex: &mut logos::Lexer<Token>) -> Option<char> {
    let digits = lex.slice().get(1..4)?;
    let code: u32 = digits.parse().ok()?;
    char::from_u32(code)
}

impl Token {
    /// Check if this token carries literal text (as opposed to bracket syntax)
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Escape(_) | Token::At | Token::Text)
    }
}

/// Tokenize a cleaned locus body, keeping the span of every token.
///
/// The token set covers every character, so nothing is ever dropped. Should logos report
/// an error anyway the span is kept as text.
pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| (result.unwrap_or(Token::Text), span))
        .collect()
}
