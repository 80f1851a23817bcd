//! Filter command - keep the documents that match a query.

use crate::OutputFormat;
use sift_core::{Config, Document, DocumentFilter, SiftError, TextSource};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

/// Read one JSON document per line, skipping blank lines.
pub fn read_documents<R: BufRead>(reader: R) -> sift_core::Result<Vec<Document>> {
    let mut docs = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: Document = serde_json::from_str(&line).map_err(|e| SiftError::InvalidDocument {
            line: i + 1,
            reason: e.to_string(),
        })?;
        docs.push(doc);
    }

    Ok(docs)
}

/// Run the filter command.
pub fn run(
    mut config: Config,
    input: Option<PathBuf>,
    query: Option<String>,
    from_abstract: bool,
    limit: Option<usize>,
    output: OutputFormat,
) -> anyhow::Result<()> {
    if from_abstract {
        config.filter.source = TextSource::Abstract;
    }
    let filter = match &query {
        Some(expr) => DocumentFilter::new(expr, &config)?,
        None => DocumentFilter::from_config(&config)?,
    };

    let docs = match &input {
        Some(path) => {
            debug!(path = %path.display(), "Reading documents");
            read_documents(BufReader::new(File::open(path)?))?
        }
        None => read_documents(io::stdin().lock())?,
    };

    let start = Instant::now();
    let report = filter.filter(docs);
    let elapsed = start.elapsed();

    let shown = report.kept.iter().take(limit.unwrap_or(usize::MAX));
    match output {
        OutputFormat::Text => {
            for matched in shown {
                println!("{}", matched.document.title);
                for url in &matched.code_urls {
                    println!("    {}", url);
                }
            }
        }
        OutputFormat::Json => {
            for matched in shown {
                println!("{}", serde_json::to_string(matched)?);
            }
        }
    }

    eprintln!();
    eprintln!(
        "Kept {} of {} documents in {:.3}ms",
        report.kept.len(),
        report.total(),
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_documents() {
        let input = "{\"title\":\"A\",\"abstract\":\"x\"}\n\n{\"title\":\"B\",\"year\":2021}\n";
        let docs = read_documents(Cursor::new(input)).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].abstract_text, "x");
        assert_eq!(docs[1].extra["year"], 2021);
    }

    #[test]
    fn test_read_documents_reports_line() {
        let input = "{\"title\":\"A\"}\nnot json\n";
        let err = read_documents(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, SiftError::InvalidDocument { line: 2, .. }));
    }

    #[test]
    fn test_read_documents_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.jsonl");
        std::fs::write(&path, "{\"title\":\"Video transformers\"}\n").unwrap();

        let docs = read_documents(BufReader::new(File::open(&path).unwrap())).unwrap();
        let filter = DocumentFilter::new("video", &Config::default()).unwrap();
        let report = filter.filter(docs);
        assert_eq!(report.kept.len(), 1);
    }
}
