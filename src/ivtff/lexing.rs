//! Lexing
//!
//! This module holds everything that looks at raw characters before any page state is
//! involved.
//!
//! The pipeline consists of:
//! 1. Line splitting: the source is split on `\n`, a trailing `\r` is dropped and blank
//!    lines are discarded. Surviving lines keep their 1-based position in the source so
//!    that errors can point back at them.
//! 2. Line classification ./line_classification.rs: every line is a comment, a locus line
//!    or a header candidate.
//! 3. Locus tag scanning ./locus_tag.rs: the `<f1r.1,@P0>` prefix of a transcription line.
//! 4. Body tokenization ./tokens.rs: the logos token set used once formatting noise has been
//!    removed from a locus body (escapes, uncertain reading brackets, plain text).
//!
//! All grammars here are small and fixed, so they are scanned by hand with [`Cursor`]
//! rather than with regular expressions.

pub mod cursor;
pub mod line_classification;
pub mod locus_tag;
pub mod tokens;

pub use cursor::Cursor;
pub use line_classification::{classify_line, LineKind};
pub use locus_tag::{scan_locus_tag, LocusMarker, LocusTag};
pub use tokens::{tokenize, Token};

/// A non-blank line of the source, with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub content: &'a str,
}

/// Split a source document into its non-blank lines.
///
/// Line numbers count the discarded blank lines too, so they always match what an editor
/// shows for the original file.
pub fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    source.split('\n').enumerate().filter_map(|(idx, raw)| {
        let content = raw.strip_suffix('\r').unwrap_or(raw);
        if content.is_empty() {
            None
        } else {
            Some(SourceLine {
                number: idx + 1,
                content,
            })
        }
    })
}
