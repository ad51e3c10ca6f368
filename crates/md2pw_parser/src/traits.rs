//! Parser trait definition.

use md2pw_ast::{AstArena, TxtNode};

use crate::ParseError;

/// Converts source text into a document tree.
///
/// Implementations must allocate every node in `arena`, give each node a
/// byte span into `source`, emit children in document order, and fill
/// `TxtNode::lines` for every leaf block (paragraphs, headings, code
/// blocks, HTML blocks and thematic breaks).
pub trait Parser: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// File extensions handled by this parser, without the leading dot.
    fn extensions(&self) -> &[&str];

    /// Parses `source`, returning the `Document` root.
    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError>;

    /// Returns true if `extension` is one of [`extensions`](Self::extensions),
    /// ignoring ASCII case.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
