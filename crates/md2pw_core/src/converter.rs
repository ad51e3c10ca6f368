//! Conversion entry point.

use md2pw_ast::{AstArena, LineIndex};
use md2pw_parser::{MarkdownParser, Parser};
use tracing::debug;

use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::extraction::extract_all;
use crate::render::render;
use crate::rewrite::rewrite;

/// Converts Markdown documents to PukiWiki markup.
///
/// A converter is immutable and can be shared between threads; every call
/// to [`convert`](Self::convert) parses into its own arena.
pub struct Converter<P = MarkdownParser> {
    parser: P,
    config: ConverterConfig,
}

impl Converter {
    /// Creates a converter using the built-in Markdown parser.
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_parser(MarkdownParser::new(), config)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl<P: Parser> Converter<P> {
    pub fn with_parser(parser: P, config: ConverterConfig) -> Self {
        Self { parser, config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Converts `source` and returns the complete wiki text.
    ///
    /// Either the whole document converts or an error is returned; there
    /// is no partial output.
    pub fn convert(&self, source: &str) -> Result<String, ConvertError> {
        let arena = AstArena::for_source(source.len());
        let root = self.parser.parse(&arena, source)?;
        debug!(
            "Parsed {} bytes with {} parser ({} bytes of tree)",
            source.len(),
            self.parser.name(),
            arena.allocated_bytes()
        );

        let index = LineIndex::new(source);
        let extraction = extract_all(&root, &index, &self.config)?;
        let rendered = render(&index, &extraction, &self.config);
        Ok(rewrite(rendered, &extraction.bolds, &extraction.links))
    }

    /// Like [`convert`](Self::convert), for raw input bytes.
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<String, ConvertError> {
        let source = std::str::from_utf8(bytes).map_err(|e| ConvertError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })?;
        self.convert(source)
    }
}

/// Converts `source` with the default configuration.
pub fn convert(source: &str) -> Result<String, ConvertError> {
    Converter::default().convert(source)
}
