//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;

/// md2pw - Convert Markdown documents to PukiWiki markup
#[derive(Parser, Debug)]
#[command(name = "md2pw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file, or `-` to read from stdin
    ///
    /// When omitted, piped stdin is read.
    pub input: Option<PathBuf>,

    /// Write the converted text to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
