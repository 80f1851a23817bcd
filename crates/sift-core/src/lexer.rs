//! Query lexer.
//!
//! Turns a query string into a flat list of lexemes. Quoted phrases are
//! lexed whole, so the parser never sees a bare `"`. Keywords are recognised
//! case-insensitively and only as complete words: `android` and `and*` are
//! plain words.

use crate::error::GrammarError;
use std::fmt;

/// Code-point ranges accepted as word characters besides ASCII alphanumerics.
const SCRIPT_RANGES: &[(u32, u32)] = &[
    // Cyrillic
    (0x0400, 0x04FF),
    // Arabic, Syriac, Arabic Supplement
    (0x0600, 0x07FF),
    // Thai
    (0x0E00, 0x0E7F),
    // Hiragana, Katakana
    (0x3040, 0x30FF),
    // Enclosed CJK Letters and Months
    (0x3200, 0x32FF),
    // CJK Unified Ideographs
    (0x4E00, 0x9FFF),
    // Hangul Jamo, Compatibility Jamo, Jamo Extended-A, Syllables + Extended-B
    (0x1100, 0x11FF),
    (0x3130, 0x318F),
    (0xA960, 0xA97F),
    (0xAC00, 0xD7FF),
    // Halfwidth and Fullwidth Forms
    (0xFF00, 0xFFEF),
];

/// Returns true if `c` may appear in a query word.
pub fn is_word_char(c: char) -> bool {
    if c.is_ascii_alphanumeric() || c == '*' {
        return true;
    }
    if c.is_whitespace() {
        return false;
    }
    let cp = u32::from(c);
    SCRIPT_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Word(String),
    Phrase(Vec<String>),
    LParen,
    RParen,
    And,
    Or,
    Not,
}

impl TokenKind {
    /// Keyword spelling for operators, `None` for everything else.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            TokenKind::And => Some("and"),
            TokenKind::Or => Some("or"),
            TokenKind::Not => Some("not"),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word(w) => write!(f, "word '{}'", w),
            TokenKind::Phrase(terms) => write!(f, "phrase \"{}\"", terms.join(" ")),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::And => write!(f, "'and'"),
            TokenKind::Or => write!(f, "'or'"),
            TokenKind::Not => write!(f, "'not'"),
        }
    }
}

/// A token and the character offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub kind: TokenKind,
    pub position: usize,
}

pub fn lex(input: &str) -> Result<Vec<Lexeme>, GrammarError> {
    let chars: Vec<char> = input.chars().collect();
    let mut lexemes = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let position = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let kind = match c {
            '(' => {
                i += 1;
                TokenKind::LParen
            }
            ')' => {
                i += 1;
                TokenKind::RParen
            }
            '"' => TokenKind::Phrase(read_phrase(&chars, &mut i)?),
            c if is_word_char(c) => {
                let word = read_word(&chars, &mut i);
                if word.eq_ignore_ascii_case("and") {
                    TokenKind::And
                } else if word.eq_ignore_ascii_case("or") {
                    TokenKind::Or
                } else if word.eq_ignore_ascii_case("not") {
                    TokenKind::Not
                } else {
                    TokenKind::Word(word)
                }
            }
            ch => return Err(GrammarError::UnexpectedCharacter { ch, position }),
        };

        lexemes.push(Lexeme { kind, position });
    }

    Ok(lexemes)
}

fn read_word(chars: &[char], i: &mut usize) -> String {
    let mut word = String::new();
    while *i < chars.len() && is_word_char(chars[*i]) {
        word.push(chars[*i]);
        *i += 1;
    }
    word
}

/// Read the words of a quoted phrase. Keywords inside quotes are plain words.
fn read_phrase(chars: &[char], i: &mut usize) -> Result<Vec<String>, GrammarError> {
    let start = *i;
    *i += 1; // opening quote
    let mut terms = Vec::new();

    while *i < chars.len() {
        let c = chars[*i];
        if c == '"' {
            *i += 1;
            if terms.is_empty() {
                return Err(GrammarError::EmptyGroup { position: start });
            }
            return Ok(terms);
        }
        if c.is_whitespace() {
            *i += 1;
        } else if is_word_char(c) {
            terms.push(read_word(chars, i));
        } else {
            return Err(GrammarError::UnexpectedCharacter { ch: c, position: *i });
        }
    }

    Err(GrammarError::UnterminatedQuote { position: start })
}
