//! Plain text listing
//!
//! One block per page, separated by blank lines:
//!
//! ```text
//! <f17r>
//!   illust_type=herbal
//!   extr_writing=other
//! okeeo chedy
//! ```

use super::registry::{FormatError, Formatter};
use crate::ivtff::pages::Transliteration;

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn serialize(&self, pages: &Transliteration) -> Result<String, FormatError> {
        let blocks: Vec<String> = pages
            .iter()
            .map(|page| {
                let mut block = format!("<{}>\n", page.id);
                for (attribute, value) in page.page_info.iter() {
                    block.push_str(&format!("  {}={}\n", attribute, value));
                }
                block.push_str(&page.text);
                block
            })
            .collect();
        Ok(blocks.join("\n"))
    }

    fn description(&self) -> &'static str {
        "One block per page: id, attributes, then the loci"
    }
}
