//! Line Classification
//!
//! Core classification logic for determining what a non-blank line of a transliteration
//! is. Classification follows this specific order:
//! 1. Comment lines (first character is `#`)
//! 2. Locus lines (open with a well-formed locus tag)
//! 3. Anything else is a header candidate, to be tried by the metadata decoder

use super::locus_tag::{scan_locus_tag, LocusTag};

/// What a single non-blank line turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Comment,
    Locus {
        tag: LocusTag<'a>,
        /// Everything after the locus tag
        body: &'a str,
    },
    HeaderCandidate,
}

/// Determine the kind of a line.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.starts_with('#') {
        return LineKind::Comment;
    }

    match scan_locus_tag(line) {
        Some(tag) => LineKind::Locus {
            body: &line[tag.len..],
            tag,
        },
        None => LineKind::HeaderCandidate,
    }
}
