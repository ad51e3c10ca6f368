//! Conversion error types.

use std::fmt;

use md2pw_parser::ParseError;
use thiserror::Error;

/// The extraction passes run for every conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    Heading,
    ListItem,
    CodeBlock,
    Bold,
    Link,
    Table,
}

impl Extractor {
    /// All passes, in the order their errors are reported.
    pub const ALL: [Extractor; 6] = [
        Extractor::Heading,
        Extractor::ListItem,
        Extractor::CodeBlock,
        Extractor::Bold,
        Extractor::Link,
        Extractor::Table,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Extractor::Heading => "heading",
            Extractor::ListItem => "list item",
            Extractor::CodeBlock => "code block",
            Extractor::Bold => "bold",
            Extractor::Link => "link",
            Extractor::Table => "table",
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while converting a document.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The parser rejected the source.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The tree did not have the shape an extraction pass relies on.
    #[error("failed to walk markdown ast ({extractor}): {message}")]
    Walk {
        extractor: Extractor,
        message: String,
    },

    /// The input bytes are not UTF-8.
    #[error("Input is not valid UTF-8 (invalid byte at offset {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConvertError {
    pub fn walk(extractor: Extractor, message: impl fmt::Display) -> Self {
        Self::Walk {
            extractor,
            message: message.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
