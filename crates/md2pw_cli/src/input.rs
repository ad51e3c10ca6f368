//! Input selection: a file, `-`, or piped stdin.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, WrapErr, miette};
use tracing::debug;

/// Where the Markdown source comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Picks the input source from the optional positional argument.
    ///
    /// Returns `None` when no argument is given and stdin is a terminal.
    pub fn select(arg: Option<&Path>, stdin_is_terminal: bool) -> Option<Self> {
        match arg {
            Some(path) if path.as_os_str() == "-" => Some(Self::Stdin),
            Some(path) => Some(Self::File(path.to_path_buf())),
            None if stdin_is_terminal => None,
            None => Some(Self::Stdin),
        }
    }

    /// Like [`select`](Self::select), checking the real stdin.
    pub fn detect(arg: Option<&Path>) -> Option<Self> {
        Self::select(arg, io::stdin().is_terminal())
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::File(path) => Some(path),
        }
    }

    /// Reads the whole input as bytes.
    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            Self::Stdin => {
                debug!("Reading from stdin");
                let mut buf = Vec::new();
                io::stdin()
                    .lock()
                    .read_to_end(&mut buf)
                    .into_diagnostic()
                    .wrap_err("Failed to read stdin")?;
                Ok(buf)
            }
            Self::File(path) => {
                debug!("Reading {}", path.display());
                fs::read(path)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to read {}", path.display()))
            }
        }
    }
}

/// Error for a missing input argument on an interactive terminal.
pub fn missing_input() -> miette::Report {
    miette!(
        help = "pass a file path, `-` for stdin, or pipe the document in",
        "input file required"
    )
}
