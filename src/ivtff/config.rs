//! Configuration loader
//!
//! The defaults in `defaults/ivtff.default.toml` are compiled in. User files are merged
//! key by key over them through the `config` crate; choices made on the command line are
//! applied last, on the typed [`IvtffConfig`].

use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;

pub use config::ConfigError;

use crate::ivtff::parser::{CandidatePolicy, DuplicateHeaderPolicy, ParseOptions};

const DEFAULT_TOML: &str = include_str!("../../defaults/ivtff.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IvtffConfig {
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

/// Parse policies
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub header_candidates: CandidatePolicy,
    pub duplicate_headers: DuplicateHeaderPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Name of a format in the format registry
    pub format: String,
}

impl IvtffConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            header_candidates: self.parser.header_candidates,
            duplicate_headers: self.parser.duplicate_headers,
        }
    }
}

/// Collects configuration files and command-line choices, then resolves them in order:
/// embedded defaults, each file as given, explicit policy and format choices.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    files: Vec<PathBuf>,
    header_candidates: Option<CandidatePolicy>,
    duplicate_headers: Option<DuplicateHeaderPolicy>,
    format: Option<String>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer a TOML file over what came before. The file must exist.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn header_candidates(mut self, policy: CandidatePolicy) -> Self {
        self.header_candidates = Some(policy);
        self
    }

    pub fn duplicate_headers(mut self, policy: DuplicateHeaderPolicy) -> Self {
        self.duplicate_headers = Some(policy);
        self
    }

    pub fn format(mut self, name: impl Into<String>) -> Self {
        self.format = Some(name.into());
        self
    }

    pub fn load(self) -> Result<IvtffConfig, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        for path in &self.files {
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }
        let mut config: IvtffConfig = builder.build()?.try_deserialize()?;

        if let Some(policy) = self.header_candidates {
            config.parser.header_candidates = policy;
        }
        if let Some(policy) = self.duplicate_headers {
            config.parser.duplicate_headers = policy;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn loads_default_config() {
        let config = Loader::new().load().expect("defaults to deserialize");
        assert_eq!(config.parser.header_candidates, CandidatePolicy::Ignore);
        assert_eq!(config.parser.duplicate_headers, DuplicateHeaderPolicy::Reset);
        assert_eq!(config.output.format, "json");
        assert_eq!(config.parse_options(), ParseOptions::default());
    }

    #[test]
    fn explicit_choices_win_over_files() {
        let file = toml_file(
            "[parser]\nheader_candidates = \"report\"\n[output]\nformat = \"yaml\"\n",
        );
        let config = Loader::new()
            .file(file.path())
            .header_candidates(CandidatePolicy::Reject)
            .load()
            .expect("config to build");
        assert_eq!(config.parse_options(), ParseOptions::strict());
        assert_eq!(config.output.format, "yaml");
    }

    #[test]
    fn later_files_override_earlier_ones() {
        let first = toml_file(
            "[parser]\nduplicate_headers = \"merge\"\n[output]\nformat = \"yaml\"\n",
        );
        let second = toml_file("[output]\nformat = \"text\"\n");
        let config = Loader::new()
            .file(first.path())
            .file(second.path())
            .load()
            .expect("config to build");
        assert_eq!(config.parser.duplicate_headers, DuplicateHeaderPolicy::Merge);
        assert_eq!(config.parser.header_candidates, CandidatePolicy::Ignore);
        assert_eq!(config.output.format, "text");
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Loader::new().file("/nonexistent/ivtff.toml").load();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_policy() {
        let file = toml_file("[parser]\nduplicate_headers = \"append\"\n");
        let result = Loader::new().file(file.path()).format("text").load();
        assert!(result.is_err());
    }
}
