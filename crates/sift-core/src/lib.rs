//! # Sift Core Library
//!
//! This crate decides whether a piece of text satisfies a boolean keyword
//! query, and builds a keep/drop filter for paper records on top of that.
//!
//! ## Query Syntax
//!
//! - `video` - the word must be a token of the text
//! - `video and emotion`, `video emotion` - both (adjacent terms mean `and`)
//! - `video or audio` - either
//! - `not survey` - absent
//! - `(a or b) and c` - grouping
//! - `"action recognition"` - the exact phrase must appear in the text
//! - `affect*`, `*former`, `tr*ns` - prefix, suffix and interior wildcards
//!
//! `not` binds tighter than `and`, which binds tighter than `or`. Keywords are
//! case-insensitive. Words may use Cyrillic, Arabic, Thai, Japanese, Chinese,
//! Korean and fullwidth characters besides ASCII letters and digits.
//!
//! ## Architecture
//!
//! - **Tokenizer** (`tokenize`): splits document text into word tokens
//! - **Lexer/Parser** (`lexer`, `parser`): turn a query string into an AST
//! - **Wildcard** (`wildcard`): per-word matching modes
//! - **Evaluator** (`eval`): walks the AST against one document
//! - **Query** (`query`): parse once, match many
//! - **Filter** (`filter`): normalization, keep/drop verdicts, batches
//! - **Config** (`config`): configuration management
//!
//! ## Example
//!
//! ```rust
//! use sift_core::matches;
//!
//! let text = "wildcards at the beginning of a search term";
//! assert!(matches(text, "*cards and term").unwrap());
//! assert!(matches(text, "not terms").unwrap());
//! assert!(matches(text, "(A and B").is_err());
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod eval;
pub mod filter;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod query;
pub mod tokenize;
pub mod types;
pub mod wildcard;

// Re-export commonly used types
pub use ast::{Node, Term};
pub use config::Config;
pub use error::{GrammarError, Result, SiftError};
pub use eval::{evaluate, Context};
pub use filter::DocumentFilter;
pub use parser::{parse, MAX_NESTING};
pub use query::Query;
pub use tokenize::tokenize;
pub use types::{Document, FilterReport, MatchedDocument, TextSource, Verdict};
pub use wildcard::WildcardMatcher;

/// Parse `expr` and evaluate it against `text`.
///
/// This is a pure function of its inputs. The text is used as-is: no case
/// folding or punctuation stripping happens here. To match many documents
/// against one expression, parse it once with [`Query::parse`] instead.
pub fn matches(text: &str, expr: &str) -> std::result::Result<bool, GrammarError> {
    Ok(Query::parse(expr)?.matches(text))
}
