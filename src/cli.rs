use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// A tool to classify class names and resources with composable filter
/// expressions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a filter expression to candidate names and print the accepted
    /// ones in input order
    Check {
        /// Filter expression, e.g. "And( Prefix( Sensitive, org.example ), Not( Suffix( Sensitive, Test ) ) )"
        expression: String,

        /// Candidate names passed directly
        names: Vec<String>,

        /// File with one candidate name per line; stdin is read when neither
        /// this nor NAMES is given
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the rejected names instead
        #[arg(long)]
        invert: bool,

        /// Evaluate the expression as written, skipping canonicalization
        #[arg(long)]
        no_optimize: bool,
    },
    /// Print the canonical and optimized forms of a filter expression
    Optimize {
        /// Filter expression
        expression: String,
    },
    /// Pretty-print the parse tree of a filter expression with execution
    /// ranks
    Explain {
        /// Filter expression
        expression: String,
    },
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
