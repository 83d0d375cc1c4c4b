//! Locus tag scanning
//!
//! Every transcription line opens with a locus tag:
//!
//! ```text
//! <f17r.1,@Pc>okeeo.chedy
//!  |   | || |
//!  |   | || locus type (word characters), optionally followed by ";T"
//!  |   | |marker (one of @ + * - = & ~)
//!  |   | locus number
//!  |   page id: "f", digits, then "r" or "v"
//! ```
//!
//! The tag is anchored at the start of the line. Everything after its closing `>` is the
//! transcription body.

use serde::Serialize;

use super::cursor::Cursor;

/// The reading marker that follows the comma in a locus tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocusMarker {
    At,
    Plus,
    Star,
    Minus,
    Equals,
    Ampersand,
    Tilde,
}

impl LocusMarker {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '@' => Some(LocusMarker::At),
            '+' => Some(LocusMarker::Plus),
            '*' => Some(LocusMarker::Star),
            '-' => Some(LocusMarker::Minus),
            '=' => Some(LocusMarker::Equals),
            '&' => Some(LocusMarker::Ampersand),
            '~' => Some(LocusMarker::Tilde),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            LocusMarker::At => '@',
            LocusMarker::Plus => '+',
            LocusMarker::Star => '*',
            LocusMarker::Minus => '-',
            LocusMarker::Equals => '=',
            LocusMarker::Ampersand => '&',
            LocusMarker::Tilde => '~',
        }
    }
}

/// A successfully scanned locus tag, borrowing from the line it was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocusTag<'a> {
    /// Owning page id, e.g. `f17r`
    pub page: &'a str,
    /// Locus number within the page, kept as written
    pub number: &'a str,
    pub marker: LocusMarker,
    pub locus_type: &'a str,
    /// Whether the tag carried the `;T` suffix
    pub transcriber_suffix: bool,
    /// Byte length of the whole tag, including both angle brackets
    pub len: usize,
}

/// Scan a locus tag at the very start of `line`.
///
/// Returns `None` when the line does not open with a well-formed tag; such lines are
/// header candidates.
pub fn scan_locus_tag(line: &str) -> Option<LocusTag<'_>> {
    let mut cursor = Cursor::new(line);
    if !cursor.eat('<') {
        return None;
    }

    let page_start = cursor.pos();
    if !cursor.eat('f') || cursor.eat_while(|c| c.is_ascii_digit()).is_empty() {
        return None;
    }
    if !matches!(cursor.bump(), Some('r' | 'v')) {
        return None;
    }
    let page = cursor.slice_from(page_start);

    if !cursor.eat('.') {
        return None;
    }
    let number = cursor.eat_while(|c| c.is_ascii_digit());
    if number.is_empty() || !cursor.eat(',') {
        return None;
    }

    let marker = cursor.bump().and_then(LocusMarker::from_char)?;
    let locus_type = cursor.eat_while(is_word_char);
    if locus_type.is_empty() {
        return None;
    }

    let transcriber_suffix = cursor.eat_str(";T");
    if !cursor.eat('>') {
        return None;
    }

    Some(LocusTag {
        page,
        number,
        marker,
        locus_type,
        transcriber_suffix,
        len: cursor.pos(),
    })
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
