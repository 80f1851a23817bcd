//! Compiled boolean queries.
//!
//! A [`Query`] is parsed once and can then be matched against any number of
//! documents, from any number of threads. It holds no per-document state.

use crate::ast::Node;
use crate::error::GrammarError;
use crate::eval::{evaluate, Context};
use crate::parser::parse;
use std::fmt;
use std::str::FromStr;

/// A parsed boolean query ready for matching.
///
/// # Example
/// ```
/// use sift_core::Query;
/// let query = Query::parse("video and (emotion or affect*)").unwrap();
/// assert!(query.matches("video based affective computing"));
/// assert!(!query.matches("audio based affective computing"));
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    source: String,
    root: Node,
}

impl Query {
    /// Parse a query expression.
    pub fn parse(expr: &str) -> Result<Self, GrammarError> {
        let root = parse(expr)?;
        Ok(Query {
            source: expr.to_string(),
            root,
        })
    }

    /// The expression this query was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The root of the syntax tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluate against an already tokenized document.
    pub fn evaluate(&self, ctx: &Context<'_>) -> bool {
        evaluate(&self.root, ctx)
    }

    /// Tokenize `text` and evaluate against it.
    pub fn matches(&self, text: &str) -> bool {
        self.evaluate(&Context::new(text))
    }
}

impl FromStr for Query {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
