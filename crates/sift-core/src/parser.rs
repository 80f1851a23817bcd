//! Query parser.
//!
//! A recursive-descent parser over the lexer's output:
//!
//! ```text
//! or_expr  = and_expr ("or" and_expr)*
//! and_expr = not_expr ("and"? not_expr)*
//! not_expr = "not"* group
//! group    = "(" or_expr ")" | phrase | word
//! ```
//!
//! The `or`/`and` chains and `not` runs are consumed in loops, so query
//! length never turns into stack depth. Only parentheses recurse, and the
//! validation pass caps how deep they may go. Operand results are memoized
//! by `(rule, offset)`, so no offset is ever parsed twice as the same rule.
//!
//! Structural mistakes (dangling operators, unbalanced or empty groups,
//! excessive nesting) are caught by that validation pass before parsing so
//! they can be reported precisely instead of as a generic "unexpected token".

use crate::ast::{Node, Term};
use crate::error::GrammarError;
use crate::lexer::{lex, Lexeme, TokenKind};
use std::collections::HashMap;
use tracing::debug;

/// Deepest nesting of parentheses plus a run of `not`s that a query may use.
pub const MAX_NESTING: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Rule {
    Not,
    Group,
}

/// A successful match and the offset just past it, or `None` on failure.
type Parsed = Option<(Node, usize)>;

struct Parser<'a> {
    lexemes: &'a [Lexeme],
    /// Character length of the query, reported for errors at end of input
    end_position: usize,
    memo: HashMap<(Rule, usize), Parsed>,
    hits: usize,
    /// Furthest offset at which a term was expected but not found
    furthest: usize,
}

impl<'a> Parser<'a> {
    fn new(lexemes: &'a [Lexeme], end_position: usize) -> Self {
        Parser {
            lexemes,
            end_position,
            memo: HashMap::new(),
            hits: 0,
            furthest: 0,
        }
    }

    fn kind(&self, pos: usize) -> Option<&'a TokenKind> {
        self.lexemes.get(pos).map(|l| &l.kind)
    }

    fn is(&self, pos: usize, kind: &TokenKind) -> bool {
        self.kind(pos) == Some(kind)
    }

    fn apply(&mut self, rule: Rule, pos: usize) -> Result<Parsed, GrammarError> {
        if let Some(cached) = self.memo.get(&(rule, pos)) {
            self.hits += 1;
            return Ok(cached.clone());
        }

        let parsed = match rule {
            Rule::Not => self.not_expr(pos)?,
            Rule::Group => self.group(pos)?,
        };

        self.memo.insert((rule, pos), parsed.clone());
        Ok(parsed)
    }

    fn or_expr(&mut self, pos: usize) -> Result<Parsed, GrammarError> {
        let (first, mut next) = match self.and_expr(pos)? {
            Some(parsed) => parsed,
            None => return Ok(None),
        };

        let mut children = vec![first];
        while self.is(next, &TokenKind::Or) {
            match self.and_expr(next + 1)? {
                Some((child, end)) => {
                    children.push(child);
                    next = end;
                }
                None => return Ok(None),
            }
        }

        Ok(Some((Node::or(children), next)))
    }

    fn and_expr(&mut self, pos: usize) -> Result<Parsed, GrammarError> {
        let (first, mut next) = match self.apply(Rule::Not, pos)? {
            Some(parsed) => parsed,
            None => return Ok(None),
        };

        let mut children = vec![first];
        loop {
            // An explicit `and`, or an operand right after the previous one
            let start = match self.kind(next) {
                Some(TokenKind::And) => next + 1,
                Some(TokenKind::Or | TokenKind::RParen) | None => break,
                Some(_) => next,
            };
            match self.apply(Rule::Not, start)? {
                Some((child, end)) => {
                    children.push(child);
                    next = end;
                }
                None => return Ok(None),
            }
        }

        Ok(Some((Node::and(children), next)))
    }

    fn not_expr(&mut self, pos: usize) -> Result<Parsed, GrammarError> {
        let mut start = pos;
        while self.is(start, &TokenKind::Not) {
            start += 1;
        }

        match self.apply(Rule::Group, start)? {
            Some((mut node, end)) => {
                for _ in pos..start {
                    node = Node::Not(Box::new(node));
                }
                Ok(Some((node, end)))
            }
            None => Ok(None),
        }
    }

    fn group(&mut self, pos: usize) -> Result<Parsed, GrammarError> {
        match self.kind(pos) {
            Some(TokenKind::LParen) => {
                if let Some((inner, next)) = self.or_expr(pos + 1)? {
                    if self.is(next, &TokenKind::RParen) {
                        return Ok(Some((inner, next + 1)));
                    }
                    self.furthest = self.furthest.max(next);
                }
                Ok(None)
            }
            Some(TokenKind::Phrase(terms)) => Ok(Some((Node::Phrase(terms.clone()), pos + 1))),
            Some(TokenKind::Word(word)) => Ok(Some((Node::Word(Term::new(word.as_str())?), pos + 1))),
            _ => {
                self.furthest = self.furthest.max(pos);
                Ok(None)
            }
        }
    }

    fn unexpected(&self, pos: usize) -> GrammarError {
        match self.lexemes.get(pos) {
            Some(lexeme) => GrammarError::UnexpectedToken {
                found: lexeme.kind.to_string(),
                position: lexeme.position,
            },
            None => GrammarError::UnexpectedToken {
                found: "end of query".to_string(),
                position: self.end_position,
            },
        }
    }
}

/// Returns true if `kind` can begin an operand.
fn starts_operand(kind: Option<&TokenKind>) -> bool {
    matches!(
        kind,
        Some(TokenKind::Word(_) | TokenKind::Phrase(_) | TokenKind::LParen | TokenKind::Not)
    )
}

/// Returns true if `kind` can end an operand.
fn ends_operand(kind: Option<&TokenKind>) -> bool {
    matches!(
        kind,
        Some(TokenKind::Word(_) | TokenKind::Phrase(_) | TokenKind::RParen)
    )
}

/// Reject structurally broken token streams with a precise error.
fn validate(lexemes: &[Lexeme]) -> Result<(), GrammarError> {
    if lexemes.is_empty() {
        return Err(GrammarError::Empty);
    }

    let mut open = Vec::new();
    let mut not_run = 0;
    for (i, lexeme) in lexemes.iter().enumerate() {
        let prev = i.checked_sub(1).map(|j| &lexemes[j].kind);
        let next = lexemes.get(i + 1).map(|l| &l.kind);
        let position = lexeme.position;

        match &lexeme.kind {
            TokenKind::LParen => {
                if next == Some(&TokenKind::RParen) {
                    return Err(GrammarError::EmptyGroup { position });
                }
                open.push(position);
            }
            TokenKind::RParen => {
                if open.pop().is_none() {
                    return Err(GrammarError::UnbalancedParens { position });
                }
            }
            kind @ (TokenKind::And | TokenKind::Or) => {
                if !ends_operand(prev) || !starts_operand(next) {
                    return Err(GrammarError::MissingOperand {
                        keyword: kind.keyword().unwrap_or_default(),
                        position,
                    });
                }
            }
            TokenKind::Not => {
                if !starts_operand(next) {
                    return Err(GrammarError::MissingOperand {
                        keyword: "not",
                        position,
                    });
                }
            }
            TokenKind::Word(_) | TokenKind::Phrase(_) => {}
        }

        not_run = if lexeme.kind == TokenKind::Not { not_run + 1 } else { 0 };
        if open.len() + not_run > MAX_NESTING {
            return Err(GrammarError::TooDeep {
                position,
                limit: MAX_NESTING,
            });
        }
    }

    match open.first() {
        Some(&position) => Err(GrammarError::UnbalancedParens { position }),
        None => Ok(()),
    }
}

/// Parse a boolean query into its syntax tree.
///
/// # Example
/// ```
/// use sift_core::{parse, Node};
/// let node = parse("a and b or c").unwrap();
/// assert!(matches!(node, Node::Or(_)));
/// ```
pub fn parse(input: &str) -> Result<Node, GrammarError> {
    let lexemes = lex(input)?;
    validate(&lexemes)?;

    let mut parser = Parser::new(&lexemes, input.chars().count());
    match parser.or_expr(0)? {
        Some((node, end)) if end == lexemes.len() => {
            debug!(
                lexemes = lexemes.len(),
                nodes = node.size(),
                memo_entries = parser.memo.len(),
                memo_hits = parser.hits,
                "Parsed query"
            );
            Ok(node)
        }
        Some((_, end)) => Err(parser.unexpected(end)),
        None => Err(parser.unexpected(parser.furthest)),
    }
}
