//! # Sift CLI
//!
//! Command-line interface for the Sift boolean keyword filter.
//!
//! ## Commands
//!
//! - `sift match <text> <expr>` - Check one piece of text against a query
//! - `sift parse <expr>` - Show how a query is understood
//! - `sift tokenize <text>` - Show the tokens a document is split into
//! - `sift filter [input]` - Keep the JSON-lines documents that match
//! - `sift config` - Show or initialize the configuration
//!
//! ## Example Usage
//!
//! ```bash
//! # Keep papers whose title mentions emotion or anything affect*
//! sift filter papers.jsonl --query "emotion or affect*"
//!
//! # Match against abstracts instead, output JSON lines
//! sift filter papers.jsonl -q "\"action recognition\" not survey" --abstract -o json
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Sift - Boolean keyword filtering for paper titles and abstracts
#[derive(Parser)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a text matches a query
    #[command(alias = "m")]
    Match {
        /// Document text
        text: String,

        /// Boolean query expression
        expr: String,

        /// Use the text as-is instead of normalizing it like a title
        #[arg(long)]
        raw: bool,
    },

    /// Parse a query and print its canonical form
    Parse {
        /// Boolean query expression
        expr: String,

        /// Print the full syntax tree instead
        #[arg(short, long)]
        tree: bool,
    },

    /// Split text into document tokens, one per line
    Tokenize {
        /// Document text
        text: String,
    },

    /// Filter JSON-lines documents by a query
    Filter {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Query expression (defaults to the configured one)
        #[arg(short, long)]
        query: Option<String>,

        /// Evaluate against abstracts instead of titles
        #[arg(short = 'a', long = "abstract")]
        from_abstract: bool,

        /// Maximum number of documents to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Show the configuration file location and effective settings
    Config {
        /// Write the default configuration if no file exists yet
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => sift_core::Config::load_from(path)?,
        None => sift_core::Config::load()?,
    };

    // Setup logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.general.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    // Execute command
    match cli.command {
        Commands::Match { text, expr, raw } => commands::r#match::run(config, &text, &expr, raw),
        Commands::Parse { expr, tree } => commands::parse::run(&expr, tree),
        Commands::Tokenize { text } => commands::tokenize::run(&text),
        Commands::Filter {
            input,
            query,
            from_abstract,
            limit,
            output,
        } => commands::filter::run(config, input, query, from_abstract, limit, output),
        Commands::Config { init } => commands::config::run(config, cli.config, init),
    }
}
