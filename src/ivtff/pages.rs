//! The page-indexed output model
//!
//! A [`Transliteration`] is what a successful parse produces: every page registered by a
//! header, in order of first appearance, each with its decoded metadata and the cleaned
//! text of its loci. Ordering is kept for stable output only; lookups go by page id.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::ivtff::metadata::PageAttribute;

/// Terminates every locus inside a page's text
pub const LOCUS_TERMINATOR: char = '\n';

/// Decoded page metadata, keyed by attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageInfo(BTreeMap<PageAttribute, String>);

impl PageInfo {
    pub fn new() -> Self {
        PageInfo(BTreeMap::new())
    }

    /// Set an attribute, replacing any earlier value
    pub fn insert(&mut self, attribute: PageAttribute, value: impl Into<String>) {
        self.0.insert(attribute, value.into());
    }

    pub fn get(&self, attribute: PageAttribute) -> Option<&str> {
        self.0.get(&attribute).map(String::as_str)
    }

    /// Look an attribute up by its output name, e.g. `"illust_type"`
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        PageAttribute::from_name(name).and_then(|attribute| self.get(attribute))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PageAttribute, &str)> {
        self.0.iter().map(|(attribute, value)| (*attribute, value.as_str()))
    }

    /// Overlay `other` on top of this info; attributes set in `other` win.
    pub fn extend(&mut self, other: PageInfo) {
        self.0.extend(other.0);
    }
}

impl FromIterator<(PageAttribute, String)> for PageInfo {
    fn from_iter<I: IntoIterator<Item = (PageAttribute, String)>>(iter: I) -> Self {
        PageInfo(iter.into_iter().collect())
    }
}

/// One page of the manuscript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    #[serde(skip)]
    pub id: String,
    pub page_info: PageInfo,
    /// Cleaned loci, each followed by [`LOCUS_TERMINATOR`]
    pub text: String,
    /// Byte offset in `text` where each locus ends. A decoded escape may put a
    /// terminator inside a locus, so the text alone cannot be split back.
    #[serde(skip)]
    locus_ends: Vec<usize>,
}

impl Page {
    pub fn new(id: impl Into<String>, page_info: PageInfo) -> Self {
        Page {
            id: id.into(),
            page_info,
            text: String::new(),
            locus_ends: Vec::new(),
        }
    }

    /// Append one transformed locus
    pub fn push_locus(&mut self, locus: &str) {
        self.text.push_str(locus);
        self.locus_ends.push(self.text.len());
        self.text.push(LOCUS_TERMINATOR);
    }

    /// The loci of this page, in document order
    pub fn loci(&self) -> impl Iterator<Item = &str> {
        let mut start = 0;
        self.locus_ends.iter().map(move |&end| {
            let locus = self.text.get(start..end).unwrap_or_default();
            start = end + LOCUS_TERMINATOR.len_utf8();
            locus
        })
    }

    pub fn locus_count(&self) -> usize {
        self.locus_ends.len()
    }

    /// Whitespace separated words over all loci
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }
}

/// All pages of a parsed document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transliteration {
    pages: Vec<Page>,
    index: HashMap<String, usize>,
}

impl Transliteration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page with fresh, empty text.
    ///
    /// A page id that is already known keeps its position; its info is replaced and its
    /// accumulated text is dropped. The replaced page is returned.
    pub fn register(&mut self, id: &str, page_info: PageInfo) -> Option<Page> {
        let page = Page::new(id, page_info);
        match self.index.get(id) {
            Some(&slot) => Some(std::mem::replace(&mut self.pages[slot], page)),
            None => {
                self.index.insert(id.to_string(), self.pages.len());
                self.pages.push(page);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Page> {
        self.index.get(id).map(|&slot| &self.pages[slot])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Page> {
        match self.index.get(id) {
            Some(&slot) => self.pages.get_mut(slot),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn page_ids(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.id.as_str())
    }
}

impl Serialize for Transliteration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pages.len()))?;
        for page in &self.pages {
            map.serialize_entry(&page.id, page)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Transliteration {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
