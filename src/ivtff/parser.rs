//! Parsing entry points and the page accumulator
//!
//! A parse is a single left-to-right fold over the non-blank lines of a document:
//!
//! - Comment lines are skipped.
//! - Header lines register a page (with empty text) under their page id.
//! - Locus lines are cleaned and appended to the page their tag names. That page must
//!   already be registered; a locus for an unknown page aborts the parse.
//! - Any other line is a header candidate that failed to decode. By default it is dropped
//!   without a trace; [`CandidatePolicy`] can turn that into a diagnostic or an error.
//!
//! A second header for an already registered page replaces its info and empties its text
//! ([`DuplicateHeaderPolicy::Reset`]). Loci collected under the earlier header are lost.
//! [`DuplicateHeaderPolicy::Merge`] keeps them instead.
//!
//! ```rust,ignore
//! use ivtff::parse_transliteration;
//!
//! let source = "<f17r> <! $Q=C $I=H>\n<f17r.1,@Pc>okeeo.chedy\n";
//! let pages = parse_transliteration(source)?;
//! assert_eq!(pages.get("f17r").unwrap().text, "okeeo chedy\n");
//! ```

use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::ivtff::diagnostics::{Diagnostic, DiagnosticKind};
use crate::ivtff::error::ParseError;
use crate::ivtff::lexing::{classify_line, source_lines, LineKind, LocusTag, SourceLine};
use crate::ivtff::metadata::{decode_header, HeaderDecodeError, PageHeader};
use crate::ivtff::pages::Transliteration;
use crate::ivtff::transcription::transform_locus;

/// What to do with lines that are neither comment, locus nor header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidatePolicy {
    /// Drop them silently
    #[default]
    Ignore,
    /// Drop them and record a diagnostic
    Report,
    /// Fail the parse
    Reject,
}

/// What a header does to a page that is already registered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateHeaderPolicy {
    /// Replace the page info and discard the text collected so far
    #[default]
    Reset,
    /// Overlay the new info on the old one and keep the text
    Merge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub header_candidates: CandidatePolicy,
    pub duplicate_headers: DuplicateHeaderPolicy,
}

impl ParseOptions {
    /// Reject every line that is not a comment, locus or header
    pub fn strict() -> Self {
        ParseOptions {
            header_candidates: CandidatePolicy::Reject,
            ..Self::default()
        }
    }

    pub fn with_header_candidates(mut self, policy: CandidatePolicy) -> Self {
        self.header_candidates = policy;
        self
    }

    pub fn with_duplicate_headers(mut self, policy: DuplicateHeaderPolicy) -> Self {
        self.duplicate_headers = policy;
        self
    }
}

/// Output of [`Parser::parse`]: the pages plus anything worth knowing that did not fail
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub pages: Transliteration,
    pub diagnostics: Vec<Diagnostic>,
}

/// Transliteration parser with configurable policies
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse a whole document.
    pub fn parse(&self, source: &str) -> Result<ParseReport, ParseError> {
        let mut accumulator = PageAccumulator::new(self.options);
        for line in source_lines(source) {
            accumulator.consume(line)?;
        }
        Ok(accumulator.finish())
    }
}

/// Parse a document with the default policies.
///
/// Unrecognized lines are dropped silently and repeated headers reset their page.
pub fn parse_transliteration(source: &str) -> Result<Transliteration, ParseError> {
    Parser::default().parse(source).map(|report| report.pages)
}

fn header_inconsistency(line: SourceLine<'_>, err: &HeaderDecodeError) -> ParseError {
    ParseError::InternalHeaderInconsistency {
        line: line.number,
        content: line.content.to_string(),
        reason: err.to_string(),
    }
}

/// The state threaded through the fold
struct PageAccumulator {
    options: ParseOptions,
    pages: Transliteration,
    diagnostics: Vec<Diagnostic>,
}

impl PageAccumulator {
    fn new(options: ParseOptions) -> Self {
        PageAccumulator {
            options,
            pages: Transliteration::new(),
            diagnostics: Vec::new(),
        }
    }

    fn consume(&mut self, line: SourceLine<'_>) -> Result<(), ParseError> {
        match classify_line(line.content) {
            LineKind::Comment => Ok(()),
            LineKind::Locus { tag, body } => self.append_locus(line, &tag, body),
            LineKind::HeaderCandidate => self.try_header(line),
        }
    }

    fn try_header(&mut self, line: SourceLine<'_>) -> Result<(), ParseError> {
        match decode_header(line.content) {
            Ok(Some(header)) => {
                self.register(line, header);
                Ok(())
            }
            Ok(None) => self.drop_candidate(line),
            Err(err) => Err(header_inconsistency(line, &err)),
        }
    }

    fn register(&mut self, line: SourceLine<'_>, header: PageHeader) {
        let PageHeader {
            page,
            page_info,
            unknown_codes,
        } = header;

        for (attribute, code) in unknown_codes {
            debug!(page = %page, %attribute, code = %code, "unknown vocabulary code kept raw");
            self.diagnostics.push(Diagnostic {
                line: line.number,
                kind: DiagnosticKind::UnknownVocabularyCode {
                    page: page.clone(),
                    attribute,
                    code,
                },
            });
        }

        debug!(
            page = %page,
            attributes = page_info.len(),
            line = line.number,
            "registered page"
        );

        if let DuplicateHeaderPolicy::Merge = self.options.duplicate_headers {
            if let Some(existing) = self.pages.get_mut(&page) {
                existing.page_info.extend(page_info);
                return;
            }
        }

        if let Some(previous) = self.pages.register(&page, page_info) {
            let discarded_loci = previous.locus_count();
            if discarded_loci > 0 {
                warn!(
                    page = %page,
                    discarded_loci,
                    line = line.number,
                    "page header repeated, collected loci discarded"
                );
            }
            self.diagnostics.push(Diagnostic {
                line: line.number,
                kind: DiagnosticKind::PageReset {
                    page,
                    discarded_loci,
                },
            });
        }
    }

    fn append_locus(
        &mut self,
        line: SourceLine<'_>,
        tag: &LocusTag<'_>,
        body: &str,
    ) -> Result<(), ParseError> {
        let page = self.pages.get_mut(tag.page).ok_or_else(|| {
            ParseError::UnregisteredPageReference {
                page: tag.page.to_string(),
                line: line.number,
                content: line.content.to_string(),
            }
        })?;

        let text = transform_locus(body);
        trace!(page = tag.page, locus = tag.number, text = %text, "appended locus");
        page.push_locus(&text);
        Ok(())
    }

    fn drop_candidate(&mut self, line: SourceLine<'_>) -> Result<(), ParseError> {
        match self.options.header_candidates {
            CandidatePolicy::Ignore => {
                debug!(line = line.number, "dropped unrecognized line");
                Ok(())
            }
            CandidatePolicy::Report => {
                debug!(line = line.number, "dropped unrecognized line");
                self.diagnostics.push(Diagnostic {
                    line: line.number,
                    kind: DiagnosticKind::DroppedHeaderCandidate {
                        content: line.content.to_string(),
                    },
                });
                Ok(())
            }
            CandidatePolicy::Reject => Err(ParseError::MalformedHeaderCandidate {
                line: line.number,
                content: line.content.to_string(),
            }),
        }
    }

    fn finish(self) -> ParseReport {
        ParseReport {
            pages: self.pages,
            diagnostics: self.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ivtff::metadata::PageAttribute;

    const HEADER_F1R: &str = "<f1r>      <! $Q=A $P=A $F=a $B=1 $I=T $L=A $H=1 $C=1 $X=V>";

    #[test]
    fn test_locus_appends_to_registered_page() {
        let source = format!("{}\n<f1r.1,@P0>fachys.ykal.ar\n", HEADER_F1R);
        let pages = parse_transliteration(&source).unwrap();
        let page = pages.get("f1r").unwrap();
        assert_eq!(page.text, "fachys ykal ar\n");
        assert_eq!(
            page.page_info.get(PageAttribute::IllustType),
            Some("text_only")
        );
        assert_eq!(
            page.page_info.get(PageAttribute::ExtrWriting),
            Some("various")
        );
    }

    #[test]
    fn test_locus_before_header_fails() {
        let source = format!("<f1r.1,@P0>fachys\n{}\n", HEADER_F1R);
        let err = parse_transliteration(&source).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnregisteredPageReference {
                page: "f1r".to_string(),
                line: 1,
                content: "<f1r.1,@P0>fachys".to_string(),
            }
        );
    }

    #[test]
    fn test_comments_and_junk_are_dropped() {
        let source = format!("#=IVTFF Eva- 2.0\n\nnot a header\n{}\n", HEADER_F1R);
        let pages = parse_transliteration(&source).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages.get("f1r").unwrap().text, "");
    }

    #[test]
    fn test_report_policy_records_dropped_lines() {
        let source = format!("{}\nnot a header\n", HEADER_F1R);
        let parser =
            Parser::new(ParseOptions::default().with_header_candidates(CandidatePolicy::Report));
        let report = parser.parse(&source).unwrap();
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic {
                line: 2,
                kind: DiagnosticKind::DroppedHeaderCandidate {
                    content: "not a header".to_string()
                },
            }]
        );
    }

    #[test]
    fn test_strict_policy_rejects_junk() {
        let source = format!("{}\n\nnot a header\n", HEADER_F1R);
        let err = Parser::new(ParseOptions::strict()).parse(&source).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedHeaderCandidate { line: 3, .. }
        ));
    }

    #[test]
    fn test_repeated_header_resets_text() {
        let source = format!(
            "{h}\n<f1r.1,@P0>daiin\n<f1r.2,+P0>chol\n{h}\n<f1r.3,+P0>shol\n",
            h = HEADER_F1R
        );
        let report = Parser::default().parse(&source).unwrap();
        assert_eq!(report.pages.get("f1r").unwrap().text, "shol\n");
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic {
                line: 4,
                kind: DiagnosticKind::PageReset {
                    page: "f1r".to_string(),
                    discarded_loci: 2,
                },
            }]
        );
    }

    #[test]
    fn test_decoded_newline_stays_inside_its_locus() {
        let locus = "<f1r.1,@P0>a@010;b";
        let source = format!("{h}\n{l}\n{h}\n", h = HEADER_F1R, l = locus);
        let report = Parser::default().parse(&source).unwrap();
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic {
                line: 3,
                kind: DiagnosticKind::PageReset {
                    page: "f1r".to_string(),
                    discarded_loci: 1,
                },
            }]
        );

        let pages = parse_transliteration(&format!("{}\n{}\n", HEADER_F1R, locus)).unwrap();
        let page = pages.get("f1r").unwrap();
        assert_eq!(page.text, "a\nb\n");
        assert_eq!(page.locus_count(), 1);
        assert_eq!(page.loci().collect::<Vec<_>>(), vec!["a\nb"]);
    }

    #[test]
    fn test_merge_policy_keeps_text() {
        let source = format!(
            "{}\n<f1r.1,@P0>daiin\n<f1r> <! $H=2>\n<f1r.2,+P0>chol\n",
            HEADER_F1R
        );
        let options = ParseOptions::default().with_duplicate_headers(DuplicateHeaderPolicy::Merge);
        let parser = Parser::new(options);
        let report = parser.parse(&source).unwrap();
        let page = report.pages.get("f1r").unwrap();
        assert_eq!(page.text, "daiin\nchol\n");
        assert_eq!(page.page_info.get(PageAttribute::Hand), Some("2"));
        assert_eq!(page.page_info.get(PageAttribute::Quire), Some("A"));
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_codes_are_reported() {
        let report = Parser::default().parse("<f9r> <! $I=Q>\n").unwrap();
        let page = report.pages.get("f9r").unwrap();
        assert_eq!(page.page_info.get(PageAttribute::IllustType), Some("Q"));
        assert_eq!(report.diagnostics.len(), 1);
        assert!(matches!(
            &report.diagnostics[0].kind,
            DiagnosticKind::UnknownVocabularyCode { code, .. } if code == "Q"
        ));
    }

    #[test]
    fn test_interleaved_pages() {
        let source = "<f1r> <! $Q=A>\n<f1v> <! $Q=A>\n<f1r.1,@P0>a\n<f1v.1,@P0>b\n<f1r.2,+P0>c\n";
        let pages = parse_transliteration(source).unwrap();
        assert_eq!(pages.get("f1r").unwrap().text, "a\nc\n");
        assert_eq!(pages.get("f1v").unwrap().text, "b\n");
        assert_eq!(pages.page_ids().collect::<Vec<_>>(), vec!["f1r", "f1v"]);
    }

    #[test]
    fn test_header_decode_failure_is_fatal_and_located() {
        let line = SourceLine {
            number: 4,
            content: "<g1r> <! $Q=A>",
        };
        let err = header_inconsistency(
            line,
            &HeaderDecodeError::MissingPageId {
                tag: "<g1r>".to_string(),
            },
        );
        assert_eq!(err.line(), 4);
        assert_eq!(err.content(), "<g1r> <! $Q=A>");

        let source = "#\n#\n\n<g1r> <! $Q=A>\n";
        let rendered = err.render(source);
        assert!(rendered.starts_with(
            "Internal header inconsistency at line 4: header matched but no page id found in tag '<g1r>'"
        ));
        assert!(rendered.contains(">>   4 | <g1r> <! $Q=A>"));
    }

    #[test]
    fn test_empty_document() {
        let pages = parse_transliteration("").unwrap();
        assert!(pages.is_empty());
    }
}
