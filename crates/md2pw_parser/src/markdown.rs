//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! The mdast produced by the `markdown` crate is mapped onto `TxtNode`s.
//! Spans come straight from mdast positions; per-line content segments are
//! computed here with a [`LineIndex`] over the source.

use std::ops::Range;

use markdown::mdast::{self, Node};
use markdown::{ParseOptions, to_mdast};
use md2pw_ast::{AstArena, LineIndex, NodeData, NodeType, Span, TxtNode};

use crate::{ParseError, Parser};

/// Markdown parser with GitHub Flavored Markdown enabled.
pub struct MarkdownParser;

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }

    fn options() -> ParseOptions {
        ParseOptions::gfm()
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError> {
        if u32::try_from(source.len()).is_err() {
            return Err(ParseError::unsupported(format!(
                "source of {} bytes exceeds the 4 GiB span limit",
                source.len()
            )));
        }

        let mdast =
            to_mdast(source, &Self::options()).map_err(|e| ParseError::invalid_source(e.to_string()))?;

        let builder = TreeBuilder {
            arena,
            index: LineIndex::new(source),
        };
        Ok(builder.convert(&mdast))
    }
}

struct TreeBuilder<'a, 's> {
    arena: &'a AstArena,
    index: LineIndex<'s>,
}

impl<'a, 's> TreeBuilder<'a, 's> {
    fn convert(&self, node: &Node) -> TxtNode<'a> {
        let span = node_span(node);

        match node {
            Node::Root(root) => self.parent(NodeType::Document, span, &root.children),

            Node::Paragraph(para) => self
                .parent(NodeType::Paragraph, span, &para.children)
                .with_lines(self.flow_lines(span, self.line_range(span))),

            Node::Heading(heading) => {
                let lines = self.line_range(span);
                // Setext headings end with their underline.
                let text_lines = if lines.len() > 1 {
                    lines.start..lines.end - 1
                } else {
                    lines
                };
                self.parent(NodeType::Header, span, &heading.children)
                    .with_lines(self.flow_lines(span, text_lines))
                    .with_data(NodeData::header(heading.depth))
            }

            Node::Blockquote(quote) => self.parent(NodeType::BlockQuote, span, &quote.children),

            Node::List(list) => self
                .parent(NodeType::List, span, &list.children)
                .with_data(NodeData::list(list.ordered)),

            Node::ListItem(item) => self.parent(NodeType::ListItem, span, &item.children),

            Node::Code(code) => self.code_block(code, span),

            Node::ThematicBreak(_) => TxtNode::new_leaf(NodeType::HorizontalRule, span)
                .with_lines(self.segments(span, self.line_range(span), |_, _| 0)),

            Node::Html(html) => self
                .text(NodeType::Html, span, &html.value)
                .with_lines(self.segments(span, self.line_range(span), |_, _| 0)),

            Node::Text(text) => self.text(NodeType::Str, span, &text.value),

            Node::Break(_) => TxtNode::new_leaf(NodeType::Break, span),

            Node::Emphasis(em) => self.parent(NodeType::Emphasis, span, &em.children),

            Node::Strong(strong) => self.parent(NodeType::Strong, span, &strong.children),

            Node::Delete(del) => self.parent(NodeType::Delete, span, &del.children),

            Node::InlineCode(code) => self.text(NodeType::Code, span, &code.value),

            Node::Link(link) => self
                .parent(NodeType::Link, span, &link.children)
                .with_data(self.link_data(&link.url)),

            Node::Image(image) => TxtNode::new_leaf(NodeType::Image, span)
                .with_data(self.link_data(&image.url)),

            Node::LinkReference(reference) => {
                self.parent(NodeType::LinkReference, span, &reference.children)
            }

            Node::ImageReference(_) => TxtNode::new_leaf(NodeType::ImageReference, span),

            Node::Definition(def) => TxtNode::new_leaf(NodeType::Definition, span)
                .with_data(self.link_data(&def.url)),

            Node::Table(table) => self.table(span, &table.children),

            Node::TableRow(row) => self.parent(NodeType::TableRow, span, &row.children),

            Node::TableCell(cell) => self.parent(NodeType::TableCell, span, &cell.children),

            Node::FootnoteDefinition(def) => {
                self.parent(NodeType::FootnoteDefinition, span, &def.children)
            }

            Node::FootnoteReference(_) => TxtNode::new_leaf(NodeType::FootnoteReference, span),

            // Anything else (math, frontmatter, MDX) is passed through as raw markup.
            _ => TxtNode::new_leaf(NodeType::Html, span)
                .with_lines(self.segments(span, self.line_range(span), |_, _| 0)),
        }
    }

    fn parent(&self, node_type: NodeType, span: Span, children: &[Node]) -> TxtNode<'a> {
        let children = self
            .arena
            .alloc_slice_fill_iter(children.iter().map(|child| self.convert(child)));
        TxtNode::new_parent(node_type, span, children)
    }

    fn text(&self, node_type: NodeType, span: Span, value: &str) -> TxtNode<'a> {
        TxtNode::new_text(node_type, span, self.arena.alloc_str(value))
    }

    fn link_data(&self, url: &str) -> NodeData<'a> {
        NodeData::link(self.arena.alloc_str(url))
    }

    /// The first row of a GFM table becomes its `TableHeader`.
    fn table(&self, span: Span, rows: &[Node]) -> TxtNode<'a> {
        let children = self
            .arena
            .alloc_slice_fill_iter(rows.iter().enumerate().map(|(i, row)| {
                let node = self.convert(row);
                if i == 0 && node.node_type == NodeType::TableRow {
                    TxtNode {
                        node_type: NodeType::TableHeader,
                        ..node
                    }
                } else {
                    node
                }
            }));
        TxtNode::new_parent(NodeType::Table, span, children)
    }

    fn code_block(&self, code: &mdast::Code, span: Span) -> TxtNode<'a> {
        let value = self.arena.alloc_str(&code.value);
        let lang = code.lang.as_deref().map(|l| self.arena.alloc_str(l));
        let lines = self.line_range(span);
        let open_line = lines.start;
        let last_line = lines.end - 1;

        let head = self
            .index
            .line_span(open_line)
            .and_then(|line| Span::new(span.start, line.end.max(span.start)).slice(self.index.source()))
            .unwrap_or_default();
        let marker = fence_marker(head);
        let fenced = marker.is_some();

        let node = TxtNode::new_text(NodeType::CodeBlock, span, value)
            .with_data(NodeData::code_block(lang, fenced));

        let content = match marker.zip(marker.and_then(|m| m.chars().next())) {
            Some((marker, fence_char)) => {
                let closed = last_line > open_line
                    && self
                        .index
                        .line_text(last_line)
                        .is_some_and(|text| is_closing_fence(text, fence_char));
                let end = if closed { last_line } else { last_line + 1 };
                let column = self
                    .index
                    .line_span(open_line)
                    .map_or(0, |line| (span.start - line.start) as usize)
                    + (head.len() - marker.len());

                // Content lines lose at most the fence's own indentation.
                self.segments(span, open_line + 1..end, move |_, text| {
                    text.bytes()
                        .take(column)
                        .take_while(|b| matches!(b, b' ' | b'\t' | b'>'))
                        .count()
                })
            }
            None => self.segments(span, lines, |_, text| indent_len(text, 4)),
        };

        node.with_lines(content)
    }

    /// Lines of a paragraph or heading; continuation lines lose leading
    /// whitespace.
    fn flow_lines(&self, span: Span, lines: Range<usize>) -> &'a [Span] {
        let first = lines.start;
        self.segments(span, lines, move |line, text| {
            if line == first {
                0
            } else {
                text.len() - text.trim_start().len()
            }
        })
    }

    /// Source lines touched by `span`.
    fn line_range(&self, span: Span) -> Range<usize> {
        let first = self.index.line_of(span.start);
        let last = if span.end > span.start {
            self.index.line_of(span.end - 1)
        } else {
            first
        };
        first..last + 1
    }

    /// One segment per line in `lines`, clipped to `span`, with the number of
    /// leading bytes given by `skip` removed.
    fn segments<F>(&self, span: Span, lines: Range<usize>, skip: F) -> &'a [Span]
    where
        F: Fn(usize, &str) -> usize,
    {
        let source = self.index.source();
        let segments: Vec<Span> = lines
            .filter_map(|line| {
                let full = self.index.line_span(line)?;
                let start = full.start.max(span.start);
                let end = full.end.min(span.end).max(start);
                let text = Span::new(start, end).slice(source)?;
                let skipped = skip(line, text).min(text.len()) as u32;
                Some(Span::new(start + skipped, end))
            })
            .collect();
        self.arena.alloc_slice_copy(&segments)
    }
}

fn node_span(node: &Node) -> Span {
    node.position().map_or(Span::default(), |pos| {
        Span::new(pos.start.offset as u32, pos.end.offset as u32)
    })
}

/// Returns the fence run and what follows it when `head`, the first line of a
/// code block, opens a fenced block.
///
/// Quote markers are skipped first. The fence must then be indented by less
/// than four columns, otherwise the line belongs to an indented block.
fn fence_marker(head: &str) -> Option<&str> {
    let mut rest = head;
    while let Some(after) = rest.trim_start_matches([' ', '\t']).strip_prefix('>') {
        rest = after.strip_prefix(' ').unwrap_or(after);
    }

    let mut columns = 0;
    let marker = rest.trim_start_matches(|c: char| match c {
        ' ' => {
            columns += 1;
            true
        }
        '\t' => {
            columns += 4 - columns % 4;
            true
        }
        _ => false,
    });

    let opens = marker.starts_with("```") || marker.starts_with("~~~");
    (opens && columns < 4).then_some(marker)
}

/// Byte length of the leading whitespace covering at most `columns`
/// columns, with tab stops every four columns.
fn indent_len(text: &str, columns: usize) -> usize {
    let mut width = 0;
    let mut len = 0;
    for b in text.bytes() {
        if width >= columns {
            break;
        }
        match b {
            b' ' => width += 1,
            b'\t' => width += 4 - width % 4,
            _ => break,
        }
        len += 1;
    }
    len
}

fn is_closing_fence(line: &str, fence_char: char) -> bool {
    let marker = line
        .trim_start_matches(|c: char| c.is_whitespace() || c == '>')
        .trim_end();
    marker.len() >= 3 && marker.chars().all(|c| c == fence_char)
}
