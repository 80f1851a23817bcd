//! Abstract syntax tree for boolean queries.
//!
//! Parenthesized groups have no node of their own: `(a or b)` parses to the
//! same `Or` node as `a or b`. `And`/`Or` always hold at least two children;
//! the parser flattens nested groups of the same kind, so `a b c` yields a
//! single three-child `And`.

use crate::error::GrammarError;
use crate::wildcard::WildcardMatcher;
use std::fmt;

/// A node of a parsed query.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Every child must match
    And(Vec<Node>),

    /// At least one child must match
    Or(Vec<Node>),

    /// The child must not match
    Not(Box<Node>),

    /// Quoted words, matched as a contiguous run of the raw text
    Phrase(Vec<String>),

    /// A single word, possibly containing `*` wildcards
    Word(Term),
}

impl Node {
    /// Build an `And`, splicing in the children of nested `And`s.
    ///
    /// A single child is returned as-is, so the result never carries a
    /// degenerate one-child group.
    pub(crate) fn and(children: Vec<Node>) -> Node {
        Self::flatten(children, true)
    }

    /// Build an `Or`, splicing in the children of nested `Or`s.
    pub(crate) fn or(children: Vec<Node>) -> Node {
        Self::flatten(children, false)
    }

    fn flatten(children: Vec<Node>, conjunction: bool) -> Node {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Node::And(inner) if conjunction => flat.extend(inner),
                Node::Or(inner) if !conjunction => flat.extend(inner),
                other => flat.push(other),
            }
        }

        if flat.len() == 1 {
            return flat.remove(0);
        }
        if conjunction {
            Node::And(flat)
        } else {
            Node::Or(flat)
        }
    }

    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        match self {
            Node::And(children) | Node::Or(children) => {
                1 + children.iter().map(Node::size).sum::<usize>()
            }
            Node::Not(child) => 1 + child.size(),
            Node::Phrase(_) | Node::Word(_) => 1,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::And(children) => write_group(f, children, " and "),
            Node::Or(children) => write_group(f, children, " or "),
            Node::Not(child) => write!(f, "not {}", child),
            Node::Phrase(terms) => write!(f, "\"{}\"", terms.join(" ")),
            Node::Word(term) => write!(f, "{}", term.text()),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, children: &[Node], separator: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", child)?;
    }
    f.write_str(")")
}

/// A query word together with its compiled matcher.
///
/// Equality compares the word text only.
#[derive(Debug, Clone)]
pub struct Term {
    text: String,
    matcher: WildcardMatcher,
}

impl Term {
    /// Compile a term from a query word.
    pub fn new(text: impl Into<String>) -> Result<Self, GrammarError> {
        let text = text.into();
        let matcher = WildcardMatcher::new(&text)?;
        Ok(Term { text, matcher })
    }

    /// The word as written in the query.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The matcher selected for this word.
    pub fn matcher(&self) -> &WildcardMatcher {
        &self.matcher
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Node {
        Node::Word(Term::new(text).unwrap())
    }

    #[test]
    fn test_flatten_same_kind() {
        let nested = Node::and(vec![word("a"), Node::and(vec![word("b"), word("c")])]);
        assert_eq!(nested, Node::And(vec![word("a"), word("b"), word("c")]));
    }

    #[test]
    fn test_flatten_keeps_other_kind() {
        let mixed = Node::or(vec![Node::and(vec![word("a"), word("b")]), word("c")]);
        assert_eq!(
            mixed,
            Node::Or(vec![Node::And(vec![word("a"), word("b")]), word("c")])
        );
    }

    #[test]
    fn test_single_child_unwraps() {
        assert_eq!(Node::and(vec![word("a")]), word("a"));
    }

    #[test]
    fn test_display() {
        let node = Node::Or(vec![
            Node::And(vec![word("a"), Node::Not(Box::new(word("b*")))]),
            Node::Phrase(vec!["quick".to_string(), "fox".to_string()]),
        ]);
        assert_eq!(node.to_string(), "((a and not b*) or \"quick fox\")");
    }

    #[test]
    fn test_size() {
        let node = Node::And(vec![word("a"), Node::Not(Box::new(word("b")))]);
        assert_eq!(node.size(), 4);
    }
}
