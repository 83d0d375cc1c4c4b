//! Non-fatal findings collected during a parse
//!
//! The default parse is silent about lines it drops and codes it cannot decode. These
//! diagnostics make that visible without changing what gets parsed.

use serde::Serialize;
use std::fmt;

use crate::ivtff::metadata::PageAttribute;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based source line
    pub line: usize,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A line that was neither comment, locus nor header, and got dropped
    DroppedHeaderCandidate { content: String },
    /// An `$I`/`$X` code missing from its vocabulary, kept raw
    UnknownVocabularyCode {
        page: String,
        attribute: PageAttribute,
        code: String,
    },
    /// A second header for a page discarded the loci collected so far
    PageReset { page: String, discarded_loci: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            DiagnosticKind::DroppedHeaderCandidate { content } => {
                write!(f, "dropped unrecognized line: {}", content.trim())
            }
            DiagnosticKind::UnknownVocabularyCode {
                page,
                attribute,
                code,
            } => write!(
                f,
                "unknown {} code '{}' on page '{}', kept as is",
                attribute, code, page
            ),
            DiagnosticKind::PageReset {
                page,
                discarded_loci,
            } => write!(
                f,
                "header for page '{}' seen again, {} loci discarded",
                page, discarded_loci
            ),
        }
    }
}
