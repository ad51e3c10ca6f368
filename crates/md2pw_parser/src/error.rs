//! Parse error types.

use thiserror::Error;

/// Errors reported by a [`Parser`](crate::Parser).
#[derive(Debug, Error)]
pub enum ParseError {
    /// The parser rejected the source text.
    #[error("invalid Markdown source: {message}")]
    InvalidSource {
        message: String,
        /// Byte offset of the problem, when the parser reports one.
        offset: Option<usize>,
    },

    /// The source uses something the tree model cannot represent.
    #[error("unsupported input: {0}")]
    Unsupported(String),

    #[error("internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: None,
        }
    }

    pub fn invalid_source_at(message: impl Into<String>, offset: usize) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: Some(offset),
        }
    }

    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported(what.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Byte offset of the error, if known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::InvalidSource { offset, .. } => *offset,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_source_display_and_offset() {
        let err = ParseError::invalid_source_at("unexpected end", 12);
        assert_eq!(err.to_string(), "invalid Markdown source: unexpected end");
        assert_eq!(err.offset(), Some(12));
    }

    #[test]
    fn other_variants_have_no_offset() {
        assert_eq!(ParseError::unsupported("huge input").offset(), None);
        assert_eq!(ParseError::internal("boom").offset(), None);
        assert_eq!(ParseError::invalid_source("bad").offset(), None);
    }
}
