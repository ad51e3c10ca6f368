//! # md2pw_parser
//!
//! Turns Markdown source into an md2pw document tree.
//!
//! - [`Parser`] is the seam between the converter and a concrete parser
//! - [`MarkdownParser`] adapts `markdown-rs` (GFM) output
//!
//! Besides node spans, the adapter records per-line content segments for
//! leaf blocks (`TxtNode::lines`). Line-oriented consumers rely on these
//! instead of re-deriving block boundaries from the source.
//!
//! ## Example
//!
//! ```rust
//! use md2pw_ast::{AstArena, NodeType};
//! use md2pw_parser::{MarkdownParser, Parser};
//!
//! let arena = AstArena::new();
//! let parser = MarkdownParser::new();
//! let source = "# Hello\n\nThis is a paragraph.";
//!
//! let doc = parser.parse(&arena, source).unwrap();
//! assert_eq!(doc.node_type, NodeType::Document);
//! assert_eq!(doc.children[0].depth(), Some(1));
//! ```

mod error;
mod markdown;
mod traits;

pub use error::ParseError;
pub use markdown::MarkdownParser;
pub use traits::Parser;
