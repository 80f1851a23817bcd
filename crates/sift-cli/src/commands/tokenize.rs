//! Tokenize command - show how document text is split.

use sift_core::tokenize;

/// Run the tokenize command.
pub fn run(text: &str) -> anyhow::Result<()> {
    for token in tokenize(text) {
        println!("{:?}", token);
    }
    Ok(())
}
