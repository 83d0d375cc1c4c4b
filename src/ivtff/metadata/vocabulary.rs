//! Controlled vocabularies used in page headers
//!
//! Header variables are single letters (`$Q`, `$P`, ...). Two of them carry coded values
//! with a fixed meaning: the illustration type and the kind of extra writing on a page.
//! Codes missing from these tables are passed through unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A page attribute settable from a header line
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PageAttribute {
    Quire,
    PagenumInQuire,
    FolionumInQuire,
    BifolionumInQuire,
    IllustType,
    CurrierLanguage,
    Hand,
    CurrierHand,
    ExtrWriting,
}

impl PageAttribute {
    pub const ALL: [PageAttribute; 9] = [
        PageAttribute::Quire,
        PageAttribute::PagenumInQuire,
        PageAttribute::FolionumInQuire,
        PageAttribute::BifolionumInQuire,
        PageAttribute::IllustType,
        PageAttribute::CurrierLanguage,
        PageAttribute::Hand,
        PageAttribute::CurrierHand,
        PageAttribute::ExtrWriting,
    ];

    /// Map a header variable letter to its attribute
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'Q' => Some(PageAttribute::Quire),
            'P' => Some(PageAttribute::PagenumInQuire),
            'F' => Some(PageAttribute::FolionumInQuire),
            'B' => Some(PageAttribute::BifolionumInQuire),
            'I' => Some(PageAttribute::IllustType),
            'L' => Some(PageAttribute::CurrierLanguage),
            'H' => Some(PageAttribute::Hand),
            'C' => Some(PageAttribute::CurrierHand),
            'X' => Some(PageAttribute::ExtrWriting),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            PageAttribute::Quire => 'Q',
            PageAttribute::PagenumInQuire => 'P',
            PageAttribute::FolionumInQuire => 'F',
            PageAttribute::BifolionumInQuire => 'B',
            PageAttribute::IllustType => 'I',
            PageAttribute::CurrierLanguage => 'L',
            PageAttribute::Hand => 'H',
            PageAttribute::CurrierHand => 'C',
            PageAttribute::ExtrWriting => 'X',
        }
    }

    /// The attribute name used in output
    pub fn name(self) -> &'static str {
        match self {
            PageAttribute::Quire => "quire",
            PageAttribute::PagenumInQuire => "pagenum_in_quire",
            PageAttribute::FolionumInQuire => "folionum_in_quire",
            PageAttribute::BifolionumInQuire => "bifolionum_in_quire",
            PageAttribute::IllustType => "illust_type",
            PageAttribute::CurrierLanguage => "currier_language",
            PageAttribute::Hand => "hand",
            PageAttribute::CurrierHand => "currier_hand",
            PageAttribute::ExtrWriting => "extr_writing",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PageAttribute::ALL.into_iter().find(|attr| attr.name() == name)
    }

    /// Decode a raw header value for this attribute.
    pub fn decode(self, raw: &str) -> DecodedValue<'_> {
        let term = match self {
            PageAttribute::IllustType => IllustrationType::from_code(raw).map(|t| t.name()),
            PageAttribute::ExtrWriting => ExtraWriting::from_code(raw).map(|t| t.name()),
            _ => return DecodedValue::Raw(raw),
        };
        match term {
            Some(term) => DecodedValue::Term(term),
            None => DecodedValue::Unknown(raw),
        }
    }
}

impl fmt::Display for PageAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of decoding a header value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedValue<'a> {
    /// The attribute has no vocabulary; the value is kept as written
    Raw(&'a str),
    /// A code found in the attribute's vocabulary
    Term(&'static str),
    /// A code the vocabulary does not know; passed through unchanged
    Unknown(&'a str),
}

impl<'a> DecodedValue<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            DecodedValue::Raw(value) | DecodedValue::Unknown(value) => value,
            DecodedValue::Term(term) => term,
        }
    }
}

/// `$I`: the kind of illustration on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllustrationType {
    Astronomical,
    Biological,
    Cosmological,
    Herbal,
    Pharmaceutical,
    StarsOnly,
    TextOnly,
    Zodiac,
}

impl IllustrationType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(IllustrationType::Astronomical),
            "B" => Some(IllustrationType::Biological),
            "C" => Some(IllustrationType::Cosmological),
            "H" => Some(IllustrationType::Herbal),
            "P" => Some(IllustrationType::Pharmaceutical),
            "S" => Some(IllustrationType::StarsOnly),
            "T" => Some(IllustrationType::TextOnly),
            "Z" => Some(IllustrationType::Zodiac),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IllustrationType::Astronomical => "astronomical",
            IllustrationType::Biological => "biological",
            IllustrationType::Cosmological => "cosmological",
            IllustrationType::Herbal => "herbal",
            IllustrationType::Pharmaceutical => "pharmaceutical",
            IllustrationType::StarsOnly => "stars_only",
            IllustrationType::TextOnly => "text_only",
            IllustrationType::Zodiac => "zodiac",
        }
    }
}

/// `$X`: extra writing found on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraWriting {
    ColorAnnotation,
    Month,
    Other,
    CharOrNumSeq,
    Various,
}

impl ExtraWriting {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(ExtraWriting::ColorAnnotation),
            "M" => Some(ExtraWriting::Month),
            "O" => Some(ExtraWriting::Other),
            "S" => Some(ExtraWriting::CharOrNumSeq),
            "V" => Some(ExtraWriting::Various),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExtraWriting::ColorAnnotation => "color_annotation",
            ExtraWriting::Month => "month",
            ExtraWriting::Other => "other",
            ExtraWriting::CharOrNumSeq => "char_or_num_seq",
            ExtraWriting::Various => "various",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_names() {
        for attr in PageAttribute::ALL {
            assert_eq!(PageAttribute::from_code(attr.code()), Some(attr));
            assert_eq!(PageAttribute::from_name(attr.name()), Some(attr));
        }
        assert_eq!(PageAttribute::from_code('Z'), None);
        assert_eq!(PageAttribute::from_name("zodiac"), None);
    }

    #[test]
    fn test_decode_illustration_type() {
        assert_eq!(
            PageAttribute::IllustType.decode("H"),
            DecodedValue::Term("herbal")
        );
        assert_eq!(
            PageAttribute::IllustType.decode("S").as_str(),
            "stars_only"
        );
        assert_eq!(
            PageAttribute::IllustType.decode("Q"),
            DecodedValue::Unknown("Q")
        );
    }

    #[test]
    fn test_decode_extra_writing() {
        assert_eq!(PageAttribute::ExtrWriting.decode("O").as_str(), "other");
        assert_eq!(PageAttribute::ExtrWriting.decode("V").as_str(), "various");
        assert_eq!(
            PageAttribute::ExtrWriting.decode("C").as_str(),
            "color_annotation"
        );
        assert_eq!(
            PageAttribute::ExtrWriting.decode("OO"),
            DecodedValue::Unknown("OO")
        );
    }

    #[test]
    fn test_attributes_without_vocabulary_stay_raw() {
        // "H" means herbal for $I, but for $H it is just a hand label
        assert_eq!(PageAttribute::Hand.decode("H"), DecodedValue::Raw("H"));
        assert_eq!(PageAttribute::Quire.decode("N"), DecodedValue::Raw("N"));
    }
}
