//! Query evaluation.
//!
//! A [`Context`] is built per document and borrowed by [`evaluate`]; nothing
//! about the document is ever stored on the query, so one parsed query can be
//! evaluated from many threads at once.

use crate::ast::Node;
use crate::tokenize::tokenize;

/// The document a query is evaluated against.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    raw_text: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> Context<'a> {
    /// Tokenize `raw_text` and wrap both for evaluation.
    pub fn new(raw_text: &'a str) -> Self {
        Context {
            raw_text,
            tokens: tokenize(raw_text),
        }
    }

    /// The untouched document text, used for phrase matching.
    pub fn raw_text(&self) -> &'a str {
        self.raw_text
    }

    /// The document's tokens, used for word matching.
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }
}

/// Evaluate `node` against `ctx`.
///
/// `And`/`Or` short-circuit left to right. Phrases match by substring
/// containment in the raw text; the individual phrase words do not need to
/// be tokens.
pub fn evaluate(node: &Node, ctx: &Context<'_>) -> bool {
    match node {
        Node::And(children) => children.iter().all(|child| evaluate(child, ctx)),
        Node::Or(children) => children.iter().any(|child| evaluate(child, ctx)),
        Node::Not(child) => !evaluate(child, ctx),
        Node::Phrase(terms) => ctx.raw_text.contains(&terms.join(" ")),
        Node::Word(term) => term.matcher().matches_any(ctx.tokens.iter().copied()),
    }
}
