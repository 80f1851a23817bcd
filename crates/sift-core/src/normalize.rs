//! Document text normalization and derived fields.
//!
//! Documents arrive with their original punctuation and casing. Before a
//! query sees them, titles and abstracts are reduced to lowercase text with
//! punctuation runs replaced by spaces. Code links are pulled from the raw
//! abstract before any of that happens.

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of non-word characters
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W+").expect("Failed to compile non-word regex"));

/// Runs of non-word characters ending in a hyphen
static NON_WORD_HYPHEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W+-").expect("Failed to compile non-word hyphen regex"));

/// http(s) links up to the next whitespace
static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("Failed to compile URL regex"));

/// Normalize a title: punctuation runs become one space, then lowercase.
///
/// A trailing punctuation run leaves a trailing space, which the tokenizer
/// turns into an empty token.
pub fn normalize_title(title: &str) -> String {
    NON_WORD.replace_all(title, " ").to_lowercase()
}

/// Normalize an abstract.
///
/// Only punctuation runs that end in a hyphen are replaced, so ordinary
/// punctuation survives for the tokenizer to split on. Whitespace is then
/// collapsed to single spaces so quoted phrases line up across line breaks.
pub fn normalize_abstract(text: &str) -> String {
    let lowered = NON_WORD_HYPHEN.replace_all(text, " ").to_lowercase();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract every http(s) link from `text`, in order of appearance.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL.find_iter(text).map(|m| m.as_str().to_string()).collect()
}
