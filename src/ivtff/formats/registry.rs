//! Named output formats
//!
//! The registry keeps formatters in registration order, which is also the order the CLI
//! lists them in. Lookups of an unknown name fail with the list of names that would have
//! worked.

use crate::ivtff::pages::Transliteration;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    UnknownFormat {
        requested: String,
        available: Vec<String>,
    },
    Serialization(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat {
                requested,
                available,
            } => write!(
                f,
                "unknown output format '{}' (available: {})",
                requested,
                available.join(", ")
            ),
            FormatError::Serialization(msg) => write!(f, "serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

/// Renders a whole [`Transliteration`] as one string
pub trait Formatter: Send + Sync {
    /// Name used on the command line and in configuration
    fn name(&self) -> &'static str;

    /// One line shown by `--list-formats`
    fn description(&self) -> &'static str;

    fn serialize(&self, pages: &Transliteration) -> Result<String, FormatError>;
}

pub struct FormatRegistry {
    formatters: Vec<Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// json, yaml and text, in that order
    pub fn builtin() -> Self {
        let mut registry = FormatRegistry {
            formatters: Vec::new(),
        };
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::TextFormatter);
        registry
    }

    /// Add a formatter. A formatter with the same name is replaced in place.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        let boxed: Box<dyn Formatter> = Box::new(formatter);
        match self
            .formatters
            .iter()
            .position(|existing| existing.name() == boxed.name())
        {
            Some(slot) => self.formatters[slot] = boxed,
            None => self.formatters.push(boxed),
        }
    }

    pub fn find(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.formatters
            .iter()
            .find(|formatter| formatter.name() == name)
            .map(|formatter| formatter.as_ref())
            .ok_or_else(|| FormatError::UnknownFormat {
                requested: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.formatters.iter().map(|formatter| formatter.name())
    }

    /// `(name, description)` for every registered format
    pub fn catalog(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.formatters
            .iter()
            .map(|formatter| (formatter.name(), formatter.description()))
    }

    /// Serialize `pages` with the format called `name`.
    pub fn render(&self, pages: &Transliteration, name: &str) -> Result<String, FormatError> {
        self.find(name)?.serialize(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PageCount;

    impl Formatter for PageCount {
        fn name(&self) -> &'static str {
            "count"
        }

        fn description(&self) -> &'static str {
            "Number of pages"
        }

        fn serialize(&self, pages: &Transliteration) -> Result<String, FormatError> {
            Ok(pages.len().to_string())
        }
    }

    #[test]
    fn test_builtin_order() {
        let registry = FormatRegistry::builtin();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["json", "yaml", "text"]);
        assert!(registry.catalog().all(|(_, description)| !description.is_empty()));
    }

    #[test]
    fn test_register_appends_and_replaces() {
        let mut registry = FormatRegistry::builtin();
        registry.register(PageCount);
        registry.register(PageCount);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["json", "yaml", "text", "count"]
        );
        assert_eq!(registry.render(&Transliteration::new(), "count").unwrap(), "0");
    }

    #[test]
    fn test_unknown_format_names_alternatives() {
        let registry = FormatRegistry::builtin();
        let err = registry.render(&Transliteration::new(), "xml").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown output format 'xml' (available: json, yaml, text)"
        );
    }
}
