//! Parse command - show how a query is understood.

use sift_core::Query;

/// Run the parse command.
pub fn run(expr: &str, tree: bool) -> anyhow::Result<()> {
    let query = match Query::parse(expr) {
        Ok(query) => query,
        Err(e) => {
            if let Some(position) = e.position() {
                eprintln!("  {}", expr);
                eprintln!("  {}^", " ".repeat(position));
            }
            return Err(e.into());
        }
    };

    if tree {
        println!("{:#?}", query.root());
    } else {
        println!("{}", query);
    }

    Ok(())
}
