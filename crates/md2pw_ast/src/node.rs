//! TxtNode definition.
//!
//! The node type shared by the parser and every extraction pass.

use crate::{NodeType, Span};

/// A node in the document tree.
///
/// Nodes are allocated in an [`AstArena`](crate::AstArena) and never
/// mutated once the parser returns, so `&TxtNode` can be shared freely
/// across threads.
///
/// # Example
///
/// ```rust
/// use md2pw_ast::{AstArena, TxtNode, NodeType, Span};
///
/// let arena = AstArena::new();
///
/// let text_node = TxtNode::new_text(NodeType::Str, Span::new(0, 5), "Hello");
///
/// let children = arena.alloc_slice_copy(&[text_node]);
/// let paragraph = TxtNode::new_parent(
///     NodeType::Paragraph,
///     Span::new(0, 5),
///     children,
/// );
/// assert_eq!(paragraph.children[0].text(), Some("Hello"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TxtNode<'a> {
    /// The type of this node.
    pub node_type: NodeType,

    /// Byte span in the source text.
    pub span: Span,

    /// Child nodes, in document order.
    pub children: &'a [TxtNode<'a>],

    /// Content line segments for leaf blocks.
    ///
    /// One span per source line of block content, without the line break.
    /// For a fenced code block these are the lines between the fences.
    pub lines: &'a [Span],

    /// Parsed text value (for text nodes like Str, Code, CodeBlock).
    pub value: Option<&'a str>,

    /// Additional node-specific data.
    pub data: NodeData<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
pub enum NodeData<'a> {
    #[default]
    None,
    /// Heading depth (1-6).
    Header(u8),
    /// Whether the list is ordered.
    List(bool),
    CodeBlock(CodeBlockData<'a>),
    Link(LinkData<'a>),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CodeBlockData<'a> {
    pub lang: Option<&'a str>,
    /// False for indented code blocks.
    pub fenced: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct LinkData<'a> {
    pub url: &'a str,
}

impl<'a> TxtNode<'a> {
    /// Creates a new parent node with children.
    #[inline]
    pub const fn new_parent(node_type: NodeType, span: Span, children: &'a [TxtNode<'a>]) -> Self {
        Self {
            node_type,
            span,
            children,
            lines: &[],
            value: None,
            data: NodeData::new(),
        }
    }

    /// Creates a new text node with a value.
    #[inline]
    pub const fn new_text(node_type: NodeType, span: Span, value: &'a str) -> Self {
        Self {
            node_type,
            span,
            children: &[],
            lines: &[],
            value: Some(value),
            data: NodeData::new(),
        }
    }

    /// Creates a new leaf node (no children, no value).
    #[inline]
    pub const fn new_leaf(node_type: NodeType, span: Span) -> Self {
        Self {
            node_type,
            span,
            children: &[],
            lines: &[],
            value: None,
            data: NodeData::new(),
        }
    }

    /// Returns this node with the given content line segments.
    #[inline]
    pub fn with_lines(mut self, lines: &'a [Span]) -> Self {
        self.lines = lines;
        self
    }

    /// Returns this node with the given data.
    #[inline]
    pub fn with_data(mut self, data: NodeData<'a>) -> Self {
        self.data = data;
        self
    }

    /// Returns the parsed text value of this node.
    #[inline]
    pub const fn text(&self) -> Option<&'a str> {
        self.value
    }

    /// Returns the first child, if any.
    #[inline]
    pub fn first_child(&self) -> Option<&TxtNode<'a>> {
        self.children.first()
    }

    /// Returns the heading depth for Header nodes.
    #[inline]
    pub const fn depth(&self) -> Option<u8> {
        match self.data {
            NodeData::Header(depth) => Some(depth),
            _ => None,
        }
    }

    /// Returns the ordered flag for List nodes.
    #[inline]
    pub const fn is_ordered(&self) -> Option<bool> {
        match self.data {
            NodeData::List(ordered) => Some(ordered),
            _ => None,
        }
    }

    /// Returns the destination of Link and Image nodes.
    #[inline]
    pub const fn url(&self) -> Option<&'a str> {
        match self.data {
            NodeData::Link(link) => Some(link.url),
            _ => None,
        }
    }

    /// Returns the info-string language of code blocks.
    #[inline]
    pub const fn lang(&self) -> Option<&'a str> {
        match self.data {
            NodeData::CodeBlock(code) => code.lang,
            _ => None,
        }
    }

    /// Returns true for fenced code blocks.
    #[inline]
    pub const fn is_fenced(&self) -> bool {
        matches!(self.data, NodeData::CodeBlock(CodeBlockData { fenced: true, .. }))
    }

    /// Returns the emphasis level: 1 for Emphasis, 2 for Strong.
    #[inline]
    pub const fn emphasis_level(&self) -> Option<u8> {
        match self.node_type {
            NodeType::Emphasis => Some(1),
            NodeType::Strong => Some(2),
            _ => None,
        }
    }
}

impl<'a> NodeData<'a> {
    /// Creates new empty node data.
    #[inline]
    pub const fn new() -> Self {
        Self::None
    }

    /// Creates node data for a header.
    #[inline]
    pub const fn header(depth: u8) -> Self {
        Self::Header(depth)
    }

    /// Creates node data for a link.
    #[inline]
    pub const fn link(url: &'a str) -> Self {
        Self::Link(LinkData { url })
    }

    /// Creates node data for a code block.
    #[inline]
    pub const fn code_block(lang: Option<&'a str>, fenced: bool) -> Self {
        Self::CodeBlock(CodeBlockData { lang, fenced })
    }

    /// Creates node data for a list.
    #[inline]
    pub const fn list(ordered: bool) -> Self {
        Self::List(ordered)
    }
}
