//! Testing utilities
//!
//! Sample transliterations live in `docs/samples/`. Tests should load them through
//! [`read_sample`] rather than copying their content, so that every test sees the same
//! documents. For small inline cases, [`header_line`] and [`locus_line`] build well-formed
//! lines.

use std::io;
use std::path::PathBuf;

/// Directory holding the sample documents
pub fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("docs")
        .join("samples")
}

pub fn sample_path(name: &str) -> PathBuf {
    samples_dir().join(name)
}

/// Read a sample document by file name, e.g. `"herbal.ivtff"`
pub fn read_sample(name: &str) -> io::Result<String> {
    std::fs::read_to_string(sample_path(name))
}

/// Build a header line from `(variable letter, value)` pairs.
pub fn header_line(page: &str, assignments: &[(char, &str)]) -> String {
    let mut line = format!("<{}>     <!", page);
    for (code, value) in assignments {
        line.push_str(&format!(" ${}={}", code, value));
    }
    if assignments.is_empty() {
        line.push(' ');
    }
    line.push('>');
    line
}

/// Build a locus line with the `@P0` marker and type.
pub fn locus_line(page: &str, number: usize, body: &str) -> String {
    format!("<{}.{},@P0>      {}", page, number, body)
}
