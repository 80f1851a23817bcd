//! Behavioural properties of the matcher, checked through the public API.

use sift_core::{matches, parse, GrammarError, Query};
use std::sync::Arc;
use std::thread;

const TEXTS: &[&str] = &[
    "wild cards term begin",
    "the quick brown fox",
    "a b",
    "c",
    "",
    "안녕하세요, 당신은 어떠세요?",
];

const OPERANDS: &[&str] = &[
    "wild",
    "term*",
    "*own",
    "q*k",
    "\"quick brown\"",
    "(a or c)",
    "not fox",
    "당신은",
];

fn m(text: &str, expr: &str) -> bool {
    matches(text, expr).unwrap_or_else(|e| panic!("{:?} failed to parse: {}", expr, e))
}

#[test]
fn matching_is_repeatable() {
    for text in TEXTS {
        for op in OPERANDS {
            assert_eq!(m(text, op), m(text, op));
        }
    }
}

#[test]
fn and_or_commute() {
    for text in TEXTS {
        for a in OPERANDS {
            for b in OPERANDS {
                assert_eq!(
                    m(text, &format!("{} and {}", a, b)),
                    m(text, &format!("{} and {}", b, a)),
                    "and: {:?} {:?} on {:?}",
                    a,
                    b,
                    text
                );
                assert_eq!(
                    m(text, &format!("{} or {}", a, b)),
                    m(text, &format!("{} or {}", b, a)),
                    "or: {:?} {:?} on {:?}",
                    a,
                    b,
                    text
                );
            }
        }
    }
}

#[test]
fn double_negation_cancels() {
    for text in TEXTS {
        for a in OPERANDS {
            assert_eq!(m(text, &format!("not (not {})", a)), m(text, a));
            assert_eq!(m(text, &format!("not not {}", a)), m(text, a));
        }
    }
}

#[test]
fn adjacency_is_and() {
    for text in TEXTS {
        for a in OPERANDS {
            for b in OPERANDS {
                assert_eq!(
                    m(text, &format!("{} {}", a, b)),
                    m(text, &format!("{} and {}", a, b))
                );
            }
        }
    }
}

#[test]
fn and_binds_tighter_than_or() {
    // a=true, b=false, c=true separates the two groupings
    let text = "a c";
    assert!(m(text, "a and b or c"));
    assert_eq!(m(text, "a and b or c"), m(text, "(a and b) or c"));
    assert!(!m("a", "b and (a or c)"));
    assert!(!m("a", "b and a or c"));
    assert!(m("c", "b and a or c"));
    assert!(!m("c", "b and (a or c)"));
}

#[test]
fn wildcard_scenarios() {
    let text = "wild cards term begin";
    assert!(m(text, "*cards and term"));
    assert!(m(text, "wild* and term"));
    assert!(m(text, "not terms"));
    assert!(m(text, "terms or begin"));
}

#[test]
fn phrase_containment() {
    let text = "the quick brown fox";
    assert!(m(text, "\"quick brown\""));
    assert!(!m(text, "\"brown quick\""));
}

#[test]
fn multi_script_suffix() {
    let text = "안녕하세요, 당신은 어떠세요?";
    assert!(m(text, "*신은"));
    assert!(m(text, "*신은 and 어떠세요"));
    assert!(!m(text, "not 당신은"));
    assert!(m("Привет мир", "При* and мир"));
    assert!(m("東京 大学", "東京"));
}

#[test]
fn malformed_queries_fail() {
    assert!(matches!(
        parse("(A and B"),
        Err(GrammarError::UnbalancedParens { .. })
    ));
    assert!(matches!(
        parse("and A"),
        Err(GrammarError::MissingOperand { .. })
    ));
    assert_eq!(parse(""), Err(GrammarError::Empty));
    assert!(matches!(
        parse("\"never closed"),
        Err(GrammarError::UnterminatedQuote { .. })
    ));
    assert!(matches!(parse("()"), Err(GrammarError::EmptyGroup { .. })));
}

#[test]
fn one_query_many_threads() {
    let query = Arc::new(Query::parse("emotion or affect* and not survey").unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let query = Arc::clone(&query);
            thread::spawn(move || {
                let text = if i % 2 == 0 {
                    format!("affective computing {}", i)
                } else {
                    format!("affective computing survey {}", i)
                };
                query.matches(&text)
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results,
        vec![true, false, true, false, true, false, true, false]
    );
}
