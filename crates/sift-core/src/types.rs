//! Core data types for Sift.
//!
//! Documents are paper records handed over by whatever collected them. Only
//! the title and abstract are interpreted; every other field is carried
//! through untouched so kept records come out the way they went in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A document to be filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Paper title
    #[serde(default)]
    pub title: String,

    /// Paper abstract
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,

    /// Every other field of the record, kept verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    /// Create a document from a title and abstract.
    pub fn new(title: impl Into<String>, abstract_text: impl Into<String>) -> Self {
        Document {
            title: title.into(),
            abstract_text: abstract_text.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// The raw text for the given source field.
    pub fn text(&self, source: TextSource) -> &str {
        match source {
            TextSource::Title => &self.title,
            TextSource::Abstract => &self.abstract_text,
        }
    }
}

/// Which document field a query is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    #[default]
    Title,
    Abstract,
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSource::Title => write!(f, "title"),
            TextSource::Abstract => write!(f, "abstract"),
        }
    }
}

impl FromStr for TextSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(TextSource::Title),
            "abstract" => Ok(TextSource::Abstract),
            _ => Err(format!("Unknown text source: {}", s)),
        }
    }
}

/// A document that passed the filter, with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedDocument {
    #[serde(flatten)]
    pub document: Document,

    /// Links found in the raw abstract
    #[serde(default)]
    pub code_urls: Vec<String>,

    /// The expression the document was matched with (empty for match-all)
    #[serde(default)]
    pub matched_query: String,
}

/// The filter's decision for one document.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Keep(MatchedDocument),
    Drop { reason: String },
}

impl Verdict {
    /// Returns true if the document is kept.
    pub fn is_keep(&self) -> bool {
        matches!(self, Verdict::Keep(_))
    }
}

/// Outcome of filtering a batch of documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterReport {
    /// Kept documents, in input order
    pub kept: Vec<MatchedDocument>,

    /// Number of documents dropped
    pub dropped: usize,
}

impl FilterReport {
    /// Total number of documents examined.
    pub fn total(&self) -> usize {
        self.kept.len() + self.dropped
    }
}
