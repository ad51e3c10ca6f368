//! # md2pw Core
//!
//! Converts Markdown documents to PukiWiki markup.
//!
//! The source is parsed once into an arena-allocated tree. Six independent
//! extractors then walk the tree in parallel and record per-line
//! annotations (headings, list items, code lines, table lines) and inline
//! substitutions (bold text, links). The renderer merges the annotations
//! with the original source lines, and the rewriter applies the inline
//! substitutions outside of code.
//!
//! ```
//! let wiki = md2pw_core::convert("# Title\n\n- **item**").unwrap();
//! assert_eq!(wiki, "* Title\n\n-''item''");
//! ```

mod codeblock;
mod config;
mod converter;
mod error;
mod extraction;
mod heading;
mod inline;
mod list;
mod render;
mod rewrite;
mod substitution;
mod table;

#[cfg(test)]
mod test_utils;

pub use codeblock::{CODE_INDENT, CodeBlockExtractor, CodeLine, FenceIndex, is_fence_marker};
pub use config::{CONFIG_FILES, ConverterConfig, MAX_WIKI_LEVEL};
pub use converter::{Converter, convert};
pub use error::{ConvertError, Extractor};
pub use extraction::{Extract, Extraction, LineMap, extract_all};
pub use heading::{HeadingAnnotation, HeadingExtractor};
pub use inline::{InlineText, SpanOutOfRange, inline_text, resolve_text};
pub use list::{ListItemAnnotation, ListItemExtractor};
pub use render::{RenderedDocument, render};
pub use rewrite::{InlineRewriter, rewrite};
pub use substitution::{BoldExtractor, LinkExtractor, Substitution};
pub use table::{TableExtractor, TableLine, is_delimiter_row};
