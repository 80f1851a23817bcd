//! Wildcard term matching.
//!
//! A query word is matched against a document's token list in one of four
//! ways, chosen once from the position and count of `*` characters:
//!
//! - no `*`: some token equals the word
//! - one leading `*` (`*cards`): some token ends with the rest
//! - one trailing `*` (`wild*`): some token starts with the rest
//! - anything else (`a*b`, `*x*`, `**`): each `*` stands for one or more
//!   characters and some token must contain a match of the resulting pattern
//!
//! Matching never folds case; callers normalize text and query beforehand.

use crate::error::GrammarError;
use regex::Regex;

/// A compiled matcher for a single query word.
#[derive(Debug, Clone)]
pub enum WildcardMatcher {
    /// Token must equal the word
    Exact(String),

    /// Token must end with this suffix (`*suffix`)
    Suffix(String),

    /// Token must start with this prefix (`prefix*`)
    Prefix(String),

    /// Token must contain a match of this pattern
    Pattern(Regex),
}

impl WildcardMatcher {
    /// Compile a matcher for `word`.
    ///
    /// Fails only if the interior pattern cannot be built, which cannot happen
    /// for words made of the query alphabet but is reported rather than
    /// assumed.
    pub fn new(word: &str) -> Result<Self, GrammarError> {
        let wildcards = word.matches('*').count();

        if wildcards == 0 {
            return Ok(WildcardMatcher::Exact(word.to_string()));
        }

        if wildcards == 1 {
            if let Some(suffix) = word.strip_prefix('*') {
                return Ok(WildcardMatcher::Suffix(suffix.to_string()));
            }
            if let Some(prefix) = word.strip_suffix('*') {
                return Ok(WildcardMatcher::Prefix(prefix.to_string()));
            }
        }

        let pattern = word
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".+");

        let regex = Regex::new(&pattern).map_err(|e| GrammarError::InvalidWildcard {
            word: word.to_string(),
            reason: e.to_string(),
        })?;

        Ok(WildcardMatcher::Pattern(regex))
    }

    /// Check a single token.
    pub fn matches_token(&self, token: &str) -> bool {
        match self {
            WildcardMatcher::Exact(word) => token == word,
            WildcardMatcher::Suffix(suffix) => token.ends_with(suffix.as_str()),
            WildcardMatcher::Prefix(prefix) => token.starts_with(prefix.as_str()),
            WildcardMatcher::Pattern(regex) => regex.is_match(token),
        }
    }

    /// Check whether any token matches. Stops at the first match.
    pub fn matches_any<'a, I>(&self, tokens: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens.into_iter().any(|token| self.matches_token(token))
    }
}
