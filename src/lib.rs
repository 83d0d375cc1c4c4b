//! # ivtff
//!
//! A parser for IVTFF manuscript transliteration files.
//!
//! An IVTFF document encodes a handwritten manuscript line by line. Page headers carry
//! controlled-vocabulary metadata, locus lines carry the transcription itself, sprinkled
//! with formatting marks, inline comments, numeric character escapes and uncertain
//! readings. This crate turns such a document into a page-indexed structure of clean,
//! whitespace-tokenizable text suitable for statistical analysis.
//!
//! File Layout
//!
//! src/ivtff
//!   ├── lexing          Line classification, locus tag scanning, body tokens
//!   ├── metadata        Header decoding and the controlled vocabularies
//!   ├── transcription   The locus text cleaning pipeline
//!   ├── parser          The page accumulator and public entry points
//!   ├── pages           The output model
//!   └── formats/config  Serialization and configuration around the core
//!
//! For the shared sample sources used across tests, see the [testing module](ivtff::testing).

pub mod ivtff;

pub use ivtff::parser::{parse_transliteration, ParseOptions, ParseReport, Parser};
pub use ivtff::pages::{Page, PageInfo, Transliteration};
pub use ivtff::error::ParseError;
