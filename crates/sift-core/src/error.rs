//! Error types for Sift core operations.
//!
//! Query syntax problems are reported through [`GrammarError`], which carries
//! the character offset of the offending input. Everything else the library
//! can fail on (configuration, document decoding, I/O) is folded into
//! [`SiftError`]. Binaries are expected to wrap these in `anyhow`.

use thiserror::Error;

/// Result type alias using SiftError
pub type Result<T> = std::result::Result<T, SiftError>;

/// A malformed boolean query.
///
/// Raised by the parser only. There is no fallback expression: a query that
/// fails to parse is a configuration mistake and must surface to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The query contained nothing but whitespace
    #[error("empty query")]
    Empty,

    /// A character that is neither a word character nor query syntax
    #[error("unexpected character {ch:?} at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// A `"` without its closing partner
    #[error("unterminated quote starting at position {position}")]
    UnterminatedQuote { position: usize },

    /// `()` or `""` with nothing inside
    #[error("empty group at position {position}")]
    EmptyGroup { position: usize },

    /// A `(` without `)` or a `)` without `(`
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParens { position: usize },

    /// `and`, `or` or `not` lacking an operand
    #[error("operator '{keyword}' at position {position} is missing an operand")]
    MissingOperand {
        keyword: &'static str,
        position: usize,
    },

    /// Parentheses or `not` runs nested past the supported depth
    #[error("query nests deeper than {limit} levels at position {position}")]
    TooDeep { position: usize, limit: usize },

    /// Any other token the grammar cannot place
    #[error("unexpected {found} at position {position}")]
    UnexpectedToken { found: String, position: usize },

    /// A wildcard word that could not be compiled into a pattern
    #[error("invalid wildcard term {word:?}: {reason}")]
    InvalidWildcard { word: String, reason: String },
}

impl GrammarError {
    /// Character offset into the query where the problem was detected, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            GrammarError::UnexpectedCharacter { position, .. }
            | GrammarError::UnterminatedQuote { position }
            | GrammarError::EmptyGroup { position }
            | GrammarError::UnbalancedParens { position }
            | GrammarError::MissingOperand { position, .. }
            | GrammarError::TooDeep { position, .. }
            | GrammarError::UnexpectedToken { position, .. } => Some(*position),
            GrammarError::Empty | GrammarError::InvalidWildcard { .. } => None,
        }
    }
}

/// Core error types for Sift operations.
#[derive(Error, Debug)]
pub enum SiftError {
    // === Query Errors ===
    /// The boolean expression could not be parsed
    #[error("invalid query: {0}")]
    Grammar(#[from] GrammarError),

    // === Document Errors ===
    /// A document record could not be decoded
    #[error("invalid document on line {line}: {reason}")]
    InvalidDocument { line: usize, reason: String },

    // === Configuration Errors ===
    /// Configuration file parsing failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    // === I/O Errors ===
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SiftError {
    /// Returns true if this error comes from a malformed query expression
    pub fn is_query_error(&self) -> bool {
        matches!(self, SiftError::Grammar(_))
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(err: serde_json::Error) -> Self {
        SiftError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_query_error() {
        let err: SiftError = GrammarError::Empty.into();
        assert!(err.is_query_error());

        let err = SiftError::ConfigError {
            reason: "bad".to_string(),
        };
        assert!(!err.is_query_error());
    }

    #[test]
    fn test_position() {
        let err = GrammarError::MissingOperand {
            keyword: "and",
            position: 4,
        };
        assert_eq!(err.position(), Some(4));
        assert_eq!(GrammarError::Empty.position(), None);
    }

    #[test]
    fn test_display() {
        let err = GrammarError::UnbalancedParens { position: 0 };
        assert_eq!(err.to_string(), "unbalanced parenthesis at position 0");
    }
}
