//! Output destination: stdout or a file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::debug;

/// Writes `text` as is; no trailing newline is added.
pub fn write_output(text: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            debug!("Writing {} bytes to {}", text.len(), path.display());
            fs::write(path, text)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .into_diagnostic()
                .wrap_err("Failed to write stdout")
        }
    }
}
