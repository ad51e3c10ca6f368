//! md2pw CLI
//!
//! Converts a Markdown document to PukiWiki markup.

mod cli;
mod input;
mod output;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser as _;
use md2pw_core::{Converter, ConverterConfig};
use md2pw_parser::Parser as _;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::input::{Input, missing_input};
use crate::output::write_output;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let Some(input) = Input::detect(cli.input.as_deref()) else {
        eprintln!("{}", <Cli as clap::CommandFactory>::command().render_usage());
        return Err(missing_input());
    };

    let config = load_config(cli.config.as_deref())?;
    let converter = Converter::new(config);

    if let Some(path) = input.path() {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !converter.parser().can_parse(ext) {
            warn!("{} does not look like a Markdown file", path.display());
        }
    }

    let bytes = input.read()?;
    let text = converter
        .convert_bytes(&bytes)
        .into_diagnostic()
        .wrap_err_with(|| match input.path() {
            Some(path) => format!("Failed to convert {}", path.display()),
            None => "Failed to convert stdin".to_string(),
        })?;

    write_output(&text, cli.output.as_deref())
}

fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    if let Some(path) = path {
        debug!("Loading config from {}", path.display());
        return ConverterConfig::from_file(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to load config {}", path.display()));
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    let config = ConverterConfig::discover(&cwd).into_diagnostic()?;
    if config.is_none() {
        debug!("No config file found, using defaults");
    }
    Ok(config.unwrap_or_default())
}
