//! Node kinds of the document tree.

/// Node kinds.
///
/// Block kinds mirror CommonMark/GFM block structure. `Emphasis` and
/// `Strong` are emphasis levels 1 and 2. A table's first row is a
/// `TableHeader`; the remaining rows are `TableRow`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NodeType {
    /// Root document node.
    Document,

    // Block elements
    /// Paragraph containing inline content.
    Paragraph,
    /// Heading (H1-H6).
    Header,
    /// Block quote.
    BlockQuote,
    /// Ordered or unordered list.
    List,
    /// Item in a list.
    ListItem,
    /// Fenced or indented code block.
    CodeBlock,
    /// Thematic break.
    HorizontalRule,
    /// Raw HTML block or inline HTML.
    Html,

    // Inline elements
    /// Plain text.
    Str,
    /// Hard line break.
    Break,
    /// Emphasis level 1 (`*text*`).
    Emphasis,
    /// Emphasis level 2 (`**text**`).
    Strong,
    /// Strikethrough text.
    Delete,
    /// Inline code.
    Code,
    /// Hyperlink.
    Link,
    /// Image.
    Image,
    /// Link reference (`[text][id]`).
    LinkReference,
    /// Image reference.
    ImageReference,
    /// Reference definition.
    Definition,

    // GFM tables
    /// Table.
    Table,
    /// Header row of a table.
    TableHeader,
    /// Body row of a table.
    TableRow,
    /// Table cell.
    TableCell,

    // Footnotes
    /// Footnote definition.
    FootnoteDefinition,
    /// Footnote reference.
    FootnoteReference,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeType::Document => "Document",
            NodeType::Paragraph => "Paragraph",
            NodeType::Header => "Header",
            NodeType::BlockQuote => "BlockQuote",
            NodeType::List => "List",
            NodeType::ListItem => "ListItem",
            NodeType::CodeBlock => "CodeBlock",
            NodeType::HorizontalRule => "HorizontalRule",
            NodeType::Html => "Html",
            NodeType::Str => "Str",
            NodeType::Break => "Break",
            NodeType::Emphasis => "Emphasis",
            NodeType::Strong => "Strong",
            NodeType::Delete => "Delete",
            NodeType::Code => "Code",
            NodeType::Link => "Link",
            NodeType::Image => "Image",
            NodeType::LinkReference => "LinkReference",
            NodeType::ImageReference => "ImageReference",
            NodeType::Definition => "Definition",
            NodeType::Table => "Table",
            NodeType::TableHeader => "TableHeader",
            NodeType::TableRow => "TableRow",
            NodeType::TableCell => "TableCell",
            NodeType::FootnoteDefinition => "FootnoteDefinition",
            NodeType::FootnoteReference => "FootnoteReference",
        };
        write!(f, "{}", name)
    }
}
