//! Document tokenizer.
//!
//! Splits document text into word tokens. Delimiters are whitespace and ASCII
//! punctuation, except for `*`, `#`, `@` and `.`:
//!
//! - `#` and `@` survive so hashtags and mentions stay whole
//! - `.` is handled per chunk: ordinary dotted text (`e.g`, `U.S.A`) is split
//!   on dots, while `#tag.v2` or `@user.name` are kept intact
//!
//! Non-Latin scripts pass through untouched since none of their code points
//! are delimiters.

/// Returns true if `c` separates tokens.
///
/// The information separators U+001C..U+001F count as whitespace here even
/// though `char::is_whitespace` excludes them.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace()
        || matches!(c, '\u{1c}'..='\u{1f}')
        || (c.is_ascii_punctuation() && !matches!(c, '*' | '#' | '@' | '.'))
}

/// Split `text` on maximal runs of delimiters.
///
/// Leading and trailing runs yield an empty chunk at that end, so `" a "`
/// becomes `["", "a", ""]`.
fn chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_run = false;

    for (i, c) in text.char_indices() {
        if is_delimiter(c) {
            if !in_run {
                chunks.push(&text[start..i]);
                in_run = true;
            }
        } else if in_run {
            start = i;
            in_run = false;
        }
    }

    chunks.push(if in_run { "" } else { &text[start..] });
    chunks
}

/// Tokenize document text.
///
/// Token order and duplicates are preserved. Empty tokens produced by leading
/// or trailing delimiters, or by consecutive dots, are kept; they never equal
/// a query word. Empty input produces no tokens at all.
///
/// # Example
/// ```
/// use sift_core::tokenize;
/// assert_eq!(tokenize("see e.g. @bob.smith"), vec!["see", "e", "g", "", "@bob.smith"]);
/// ```
pub fn tokenize(raw_text: &str) -> Vec<&str> {
    if raw_text.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    for chunk in chunks(raw_text) {
        if chunk.contains('.') && !chunk.starts_with('#') && !chunk.starts_with('@') {
            tokens.extend(chunk.split('.'));
        } else {
            tokens.push(chunk);
        }
    }
    tokens
}
