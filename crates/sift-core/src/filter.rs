//! Keep/drop filtering of documents against a boolean query.
//!
//! The filter owns a parsed [`Query`] and applies it to the normalized title
//! or abstract of each document. An empty expression keeps everything.
//!
//! ## Performance
//!
//! Large batches are evaluated on the Rayon thread pool. The query is shared
//! read-only between workers and each document gets its own evaluation
//! context, so no synchronization is involved.

use crate::config::{Config, PerformanceConfig};
use crate::error::Result;
use crate::eval::Context;
use crate::normalize::{extract_urls, normalize_abstract, normalize_title};
use crate::query::Query;
use crate::types::{Document, FilterReport, MatchedDocument, TextSource, Verdict};
use rayon::prelude::*;
use tracing::{debug, info, instrument, trace};

/// A reusable keep/drop filter.
///
/// ## Example
///
/// ```rust
/// use sift_core::{Config, Document, DocumentFilter};
///
/// let filter = DocumentFilter::new("emotion or affect*", &Config::default()).unwrap();
/// let verdict = filter.check(Document::new("Affective Computing: A Review", ""));
/// assert!(verdict.is_keep());
/// ```
#[derive(Debug, Clone)]
pub struct DocumentFilter {
    /// Parsed query, `None` when every document is kept
    query: Option<Query>,

    /// Field the query is evaluated against
    source: TextSource,

    /// Whether to collect links from kept abstracts
    extract_code_urls: bool,

    /// Parallel evaluation settings
    performance: PerformanceConfig,
}

impl DocumentFilter {
    /// Build a filter for `expr`.
    ///
    /// An empty or whitespace-only expression keeps every document. Anything
    /// else must parse; grammar errors are returned, never papered over.
    pub fn new(expr: &str, config: &Config) -> Result<Self> {
        let expr = expr.trim();
        let query = if expr.is_empty() {
            None
        } else if config.query.fold_case {
            Some(Query::parse(&expr.to_lowercase())?)
        } else {
            Some(Query::parse(expr)?)
        };

        match &query {
            Some(q) => info!(query = %q, source = %config.filter.source, "Compiled document filter"),
            None => info!("Empty query, keeping every document"),
        }

        Ok(DocumentFilter {
            query,
            source: config.filter.source,
            extract_code_urls: config.filter.extract_code_urls,
            performance: config.performance.clone(),
        })
    }

    /// Build a filter from the expression stored in the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.query.expr, config)
    }

    /// Evaluate against a different document field.
    pub fn with_source(mut self, source: TextSource) -> Self {
        self.source = source;
        self
    }

    /// The parsed query, if any.
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Returns true if this filter keeps everything.
    pub fn matches_all(&self) -> bool {
        self.query.is_none()
    }

    /// The normalized text the query sees for `doc`.
    pub fn normalized_text(&self, doc: &Document) -> String {
        match self.source {
            TextSource::Title => normalize_title(&doc.title),
            TextSource::Abstract => normalize_abstract(&doc.abstract_text),
        }
    }

    /// Check whether `doc` passes the query, without deriving any fields.
    pub fn is_match(&self, doc: &Document) -> bool {
        match &self.query {
            None => true,
            Some(query) => {
                let text = self.normalized_text(doc);
                query.evaluate(&Context::new(&text))
            }
        }
    }

    /// Decide whether to keep `doc`.
    pub fn check(&self, doc: Document) -> Verdict {
        if !self.is_match(&doc) {
            trace!(title = %doc.title, "Dropping document");
            return Verdict::Drop {
                reason: format!("missing keyword in {:?}", doc.title),
            };
        }

        let code_urls = if self.extract_code_urls {
            extract_urls(&doc.abstract_text)
        } else {
            Vec::new()
        };

        Verdict::Keep(MatchedDocument {
            document: doc,
            code_urls,
            matched_query: self
                .query
                .as_ref()
                .map(|q| q.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    /// Filter a batch of documents, preserving input order.
    #[instrument(skip_all, fields(documents = docs.len()))]
    pub fn filter(&self, docs: Vec<Document>) -> FilterReport {
        let verdicts: Vec<Verdict> = if self.performance.use_parallel(docs.len()) {
            debug!("Filtering in parallel");
            docs.into_par_iter().map(|doc| self.check(doc)).collect()
        } else {
            docs.into_iter().map(|doc| self.check(doc)).collect()
        };

        let mut report = FilterReport::default();
        for verdict in verdicts {
            match verdict {
                Verdict::Keep(matched) => report.kept.push(matched),
                Verdict::Drop { .. } => report.dropped += 1,
            }
        }

        info!(
            kept = report.kept.len(),
            dropped = report.dropped,
            "Filtered documents"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(expr: &str) -> DocumentFilter {
        DocumentFilter::new(expr, &Config::default()).unwrap()
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let f = filter("   ");
        assert!(f.matches_all());
        assert!(f.check(Document::new("anything", "")).is_keep());

        match f.check(Document::new("t", "")) {
            Verdict::Keep(m) => assert_eq!(m.matched_query, ""),
            Verdict::Drop { .. } => panic!("expected keep"),
        }
    }

    #[test]
    fn test_invalid_query_is_an_error() {
        let err = DocumentFilter::new("(video and", &Config::default()).unwrap_err();
        assert!(err.is_query_error());
    }

    #[test]
    fn test_title_is_normalized() {
        let f = filter("video understanding");
        assert!(f.check(Document::new("Video-Understanding: A Survey", "")).is_keep());
        assert!(!f.check(Document::new("Audio Understanding", "")).is_keep());
    }

    #[test]
    fn test_query_case_folding() {
        let f = filter("Video AND Survey");
        assert!(f.check(Document::new("A video survey", "")).is_keep());

        let mut config = Config::default();
        config.query.fold_case = false;
        let f = DocumentFilter::new("Video", &config).unwrap();
        assert!(!f.check(Document::new("A video survey", "")).is_keep());
    }

    #[test]
    fn test_abstract_source() {
        let f = filter("\"action recognition\"").with_source(TextSource::Abstract);
        let doc = Document::new("Untitled", "We improve Action\n  Recognition.");
        assert!(f.check(doc).is_keep());
    }

    #[test]
    fn test_code_urls() {
        let f = filter("video");
        let doc = Document::new("Video models", "Code: https://github.com/org/repo");
        match f.check(doc) {
            Verdict::Keep(m) => {
                assert_eq!(m.code_urls, vec!["https://github.com/org/repo".to_string()]);
                assert_eq!(m.matched_query, "video");
            }
            Verdict::Drop { reason } => panic!("unexpected drop: {}", reason),
        }

        let mut config = Config::default();
        config.filter.extract_code_urls = false;
        let f = DocumentFilter::new("video", &config).unwrap();
        match f.check(Document::new("Video", "https://x.org")) {
            Verdict::Keep(m) => assert!(m.code_urls.is_empty()),
            Verdict::Drop { .. } => panic!("expected keep"),
        }
    }

    #[test]
    fn test_drop_reason() {
        match filter("video").check(Document::new("Audio", "")) {
            Verdict::Drop { reason } => assert_eq!(reason, "missing keyword in \"Audio\""),
            Verdict::Keep(_) => panic!("expected drop"),
        }
    }

    #[test]
    fn test_filter_batch_sequential_and_parallel_agree() {
        let docs: Vec<Document> = (0..1000)
            .map(|i| {
                let title = if i % 3 == 0 {
                    format!("Emotion recognition {}", i)
                } else {
                    format!("Object detection {}", i)
                };
                Document::new(title, "")
            })
            .collect();

        let parallel = filter("emotion or affect*");
        let mut config = Config::default();
        config.performance.parallel = false;
        let sequential = DocumentFilter::new("emotion or affect*", &config).unwrap();

        let a = parallel.filter(docs.clone());
        let b = sequential.filter(docs);

        assert_eq!(a.kept.len(), 334);
        assert_eq!(a.dropped, 666);
        assert_eq!(a.total(), 1000);
        assert_eq!(a, b);
        assert_eq!(a.kept[1].document.title, "Emotion recognition 3");
    }
}
