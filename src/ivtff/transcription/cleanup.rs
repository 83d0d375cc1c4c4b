//! Character-level cleanup of locus bodies (steps 1 to 3)

/// Remove spaces, curly braces and question marks.
pub fn strip_formatting(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '{' | '}' | '?'))
        .collect()
}

/// Remove `<...>` inline comments, each ending at the first `>` after its `<`.
///
/// A `<` with no closing `>` after it is kept as is.
pub fn remove_inline_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }

    out.push_str(rest);
    out
}

/// Replace the `.` and `,` word separators with a single space each.
pub fn separate_words(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '.' | ',') { ' ' } else { c })
        .collect()
}
