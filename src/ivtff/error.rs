//! Error types for parsing transliterations

use std::fmt;

/// Errors that abort a parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A header matched the grammar but its page id could not be extracted
    InternalHeaderInconsistency {
        line: usize,
        content: String,
        reason: String,
    },
    /// A locus line names a page no header has registered yet
    UnregisteredPageReference {
        page: String,
        line: usize,
        content: String,
    },
    /// A line that is neither comment, locus nor header (strict mode only)
    MalformedHeaderCandidate { line: usize, content: String },
}

impl ParseError {
    /// 1-based source line the error refers to
    pub fn line(&self) -> usize {
        match self {
            ParseError::InternalHeaderInconsistency { line, .. }
            | ParseError::UnregisteredPageReference { line, .. }
            | ParseError::MalformedHeaderCandidate { line, .. } => *line,
        }
    }

    /// The offending line as written
    pub fn content(&self) -> &str {
        match self {
            ParseError::InternalHeaderInconsistency { content, .. }
            | ParseError::UnregisteredPageReference { content, .. }
            | ParseError::MalformedHeaderCandidate { content, .. } => content,
        }
    }

    /// Render the error followed by the surrounding source lines.
    pub fn render(&self, source: &str) -> String {
        format!("{}\n\n{}", self, format_source_context(source, self.line()))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InternalHeaderInconsistency { line, reason, .. } => {
                write!(f, "Internal header inconsistency at line {}: {}", line, reason)
            }
            ParseError::UnregisteredPageReference { page, line, .. } => write!(
                f,
                "Locus at line {} references page '{}' before any header registered it",
                line, page
            ),
            ParseError::MalformedHeaderCandidate { line, content } => write!(
                f,
                "Line {} is not a comment, locus or page header: {}",
                line,
                content.trim()
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Format source code context around an error line
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// `line` is 1-indexed, as are the printed numbers.
pub fn format_source_context(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = line.saturating_sub(1);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for line_num in start_line..end_line {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!(
            "{} {:3} | {}\n",
            marker,
            line_num + 1,
            lines[line_num]
        ));
    }

    context
}
