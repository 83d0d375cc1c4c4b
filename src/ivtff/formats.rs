//! Output formats for parsed transliterations
//!
//! Every format implements [`Formatter`] and is looked up by name through a
//! [`FormatRegistry`]. The built-in formats are:
//!
//! - `json`: pretty printed JSON, a map from page id to `{page_info, text}`
//! - `yaml`: the same structure as YAML
//! - `text`: a plain listing, one block per page

pub mod registry;
pub mod text;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use text::TextFormatter;

use crate::ivtff::pages::Transliteration;

/// Pretty printed JSON
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, pages: &Transliteration) -> Result<String, FormatError> {
        serde_json::to_string_pretty(pages)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| FormatError::Serialization(e.to_string()))
    }

    fn description(&self) -> &'static str {
        "Page id to {page_info, text} map as JSON"
    }
}

/// YAML, same structure as the JSON output
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn serialize(&self, pages: &Transliteration) -> Result<String, FormatError> {
        serde_yaml::to_string(pages).map_err(|e| FormatError::Serialization(e.to_string()))
    }

    fn description(&self) -> &'static str {
        "Page id to {page_info, text} map as YAML"
    }
}
