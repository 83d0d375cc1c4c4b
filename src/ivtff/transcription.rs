//! Locus transcription transformer
//!
//! Turns the body of a locus line into clean, whitespace-tokenizable text. The steps run in
//! a fixed order; each one only sees what the previous steps left behind:
//!
//! 1. Strip formatting marks: spaces, `{`, `}` and `?` ./transcription/cleanup.rs
//! 2. Remove inline comments `<...>` (shortest span)
//! 3. Turn the word separators `.` and `,` into single spaces
//! 4. Decode `@NNN;` escapes to the character with code point NNN ./transcription/readings.rs
//! 5. Collapse uncertain readings to their first alternative: `[a:b]` gives `a`, `[ab]`
//!    gives `a`
//!
//! Steps 4 and 5 share one tokenization pass, so characters produced by an escape are
//! literal text and never bracket syntax.

pub mod cleanup;
pub mod readings;

pub use cleanup::{remove_inline_comments, separate_words, strip_formatting};
pub use readings::resolve_readings;

/// Run the whole pipeline over a locus body (the part of the line after its tag).
pub fn transform_locus(body: &str) -> String {
    let stripped = strip_formatting(body);
    let uncommented = remove_inline_comments(&stripped);
    let separated = separate_words(&uncommented);
    resolve_readings(&separated)
}
