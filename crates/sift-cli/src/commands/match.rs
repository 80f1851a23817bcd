//! Match command - check one text against a query.

use sift_core::{Config, Document, DocumentFilter};

/// Run the match command.
///
/// By default the text is normalized like a title and the query is folded
/// per configuration, exactly as `sift filter` would see it. With `raw` both
/// are used verbatim.
pub fn run(config: Config, text: &str, expr: &str, raw: bool) -> anyhow::Result<()> {
    let matched = if raw {
        sift_core::matches(text, expr)?
    } else {
        let filter = DocumentFilter::new(expr, &config)?;
        filter.is_match(&Document::new(text, ""))
    };

    println!("{}", matched);
    Ok(())
}
