//! Metadata header decoding
//!
//! A page header opens a new page and carries its metadata:
//!
//! ```text
//! <f17r>     <! $Q=C $P=A $F=a $B=1 $I=H $L=A $H=1 $C=1 $X=O>
//! ```
//!
//! Grammar (hand-scanned, anchored at the line start):
//!
//! ```text
//! header     := page-tag ws+ "<!" ws+ ( assignment sep* )* ">"
//! page-tag   := "<f" [^>]{1,10} ">"
//! assignment := "$" [QPFBILHCX] "=" [^>\s]+
//! sep        := ws | ">"
//! ```
//!
//! The separator runs may swallow `>` characters, so the block closes at the last `>` of
//! the last separator run that has one. Assignments written after that point are not part
//! of the header. Text following the block is ignored.
//!
//! A line that does not fit the grammar is not an error here: the decoder answers
//! `Ok(None)` and the caller decides what to do with the line.

pub mod vocabulary;

pub use vocabulary::{DecodedValue, ExtraWriting, IllustrationType, PageAttribute};

use std::fmt;
use std::ops::Range;

use crate::ivtff::lexing::Cursor;
use crate::ivtff::pages::PageInfo;

/// Longest page id accepted after the leading `f`
const MAX_PAGE_ID_TAIL: usize = 10;

/// A decoded page header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
    pub page: String,
    pub page_info: PageInfo,
    /// Vocabulary codes that were passed through undecoded
    pub unknown_codes: Vec<(PageAttribute, String)>,
}

/// Errors that can occur while decoding a header the grammar accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderDecodeError {
    /// The header matched but its opening tag did not yield a page id
    MissingPageId { tag: String },
}

impl fmt::Display for HeaderDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderDecodeError::MissingPageId { tag } => {
                write!(f, "header matched but no page id found in tag '{}'", tag)
            }
        }
    }
}

impl std::error::Error for HeaderDecodeError {}

/// The raw shape of a header line, before any vocabulary decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    line: &'a str,
    tag: Range<usize>,
    assignments: Vec<(PageAttribute, &'a str)>,
    block_end: usize,
}

impl<'a> HeaderMatch<'a> {
    /// The opening page tag, angle brackets included
    pub fn tag(&self) -> &'a str {
        &self.line[self.tag.clone()]
    }

    /// Re-extract the page id from the opening tag.
    pub fn page_id(&self) -> Option<&'a str> {
        let id = self.tag().strip_prefix('<')?.strip_suffix('>')?;
        if id.starts_with('f') && id.len() > 1 {
            Some(id)
        } else {
            None
        }
    }

    /// `$K=V` assignments inside the block, in source order
    pub fn assignments(&self) -> &[(PageAttribute, &'a str)] {
        &self.assignments
    }

    /// The header text up to and including the closing `>`
    pub fn matched(&self) -> &'a str {
        &self.line[..self.block_end]
    }
}

/// Try to match the header grammar at the start of `line`.
pub fn match_header(line: &str) -> Option<HeaderMatch<'_>> {
    let mut cursor = Cursor::new(line);

    if !cursor.eat_str("<f") {
        return None;
    }
    let tail = cursor.eat_while(|c| c != '>');
    let tail_len = tail.chars().count();
    if tail_len == 0 || tail_len > MAX_PAGE_ID_TAIL || !cursor.eat('>') {
        return None;
    }
    let tag = 0..cursor.pos();

    if cursor.eat_while(char::is_whitespace).is_empty() || !cursor.eat_str("<!") {
        return None;
    }
    if cursor.eat_while(char::is_whitespace).is_empty() {
        return None;
    }

    let mut assignments = Vec::new();
    let mut kept = 0;
    let mut block_end = None;

    if cursor.peek() == Some('>') {
        block_end = Some(cursor.pos() + 1);
    } else {
        while let Some(assignment) = scan_assignment(&mut cursor) {
            assignments.push(assignment);
            let run_start = cursor.pos();
            let run = cursor.eat_while(|c| c.is_whitespace() || c == '>');
            if let Some(close) = run.rfind('>') {
                block_end = Some(run_start + close + 1);
                kept = assignments.len();
            }
        }
        assignments.truncate(kept);
    }

    Some(HeaderMatch {
        line,
        tag,
        assignments,
        block_end: block_end?,
    })
}

fn scan_assignment<'a>(cursor: &mut Cursor<'a>) -> Option<(PageAttribute, &'a str)> {
    if !cursor.eat('$') {
        return None;
    }
    let attribute = cursor.bump().and_then(PageAttribute::from_code)?;
    if !cursor.eat('=') {
        return None;
    }
    let value = cursor.eat_while(|c| !c.is_whitespace() && c != '>');
    if value.is_empty() {
        return None;
    }
    Some((attribute, value))
}

/// Decode a header line into its page id and page info.
///
/// Returns `Ok(None)` when the line is not a header at all.
pub fn decode_header(line: &str) -> Result<Option<PageHeader>, HeaderDecodeError> {
    let Some(header) = match_header(line) else {
        return Ok(None);
    };

    let page = header
        .page_id()
        .ok_or_else(|| HeaderDecodeError::MissingPageId {
            tag: header.tag().to_string(),
        })?;

    let mut page_info = PageInfo::new();
    let mut unknown_codes = Vec::new();
    for &(attribute, raw) in header.assignments() {
        let decoded = attribute.decode(raw);
        if let DecodedValue::Unknown(code) = decoded {
            unknown_codes.push((attribute, code.to_string()));
        }
        page_info.insert(attribute, decoded.as_str());
    }

    Ok(Some(PageHeader {
        page: page.to_string(),
        page_info,
        unknown_codes,
    }))
}
