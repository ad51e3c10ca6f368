//! Dispatch helpers used by the default `Visitor` methods.

use std::ops::ControlFlow;

use crate::{NodeType, TxtNode};

use super::visit::{VisitResult, Visitor};

/// Visits `node`: `enter_node`, the type-specific `visit_*`, then `exit_node`.
///
/// A `Break` from any of the three stops immediately; `exit_node` is not
/// called for a node whose visit broke.
pub fn walk_node<'a, V>(visitor: &mut V, node: &TxtNode<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    visitor.enter_node(node)?;

    match node.node_type {
        NodeType::Document => visitor.visit_document(node),
        NodeType::Paragraph => visitor.visit_paragraph(node),
        NodeType::Header => visitor.visit_header(node),
        NodeType::BlockQuote => visitor.visit_block_quote(node),
        NodeType::List => visitor.visit_list(node),
        NodeType::ListItem => visitor.visit_list_item(node),
        NodeType::CodeBlock => visitor.visit_code_block(node),
        NodeType::HorizontalRule => visitor.visit_horizontal_rule(node),
        NodeType::Html => visitor.visit_html(node),

        NodeType::Str => visitor.visit_str(node),
        NodeType::Break => visitor.visit_break(node),
        NodeType::Emphasis => visitor.visit_emphasis(node),
        NodeType::Strong => visitor.visit_strong(node),
        NodeType::Delete => visitor.visit_delete(node),
        NodeType::Code => visitor.visit_code(node),
        NodeType::Link => visitor.visit_link(node),
        NodeType::Image => visitor.visit_image(node),

        NodeType::LinkReference => visitor.visit_link_reference(node),
        NodeType::ImageReference => visitor.visit_image_reference(node),
        NodeType::Definition => visitor.visit_definition(node),

        NodeType::Table => visitor.visit_table(node),
        NodeType::TableHeader => visitor.visit_table_header(node),
        NodeType::TableRow => visitor.visit_table_row(node),
        NodeType::TableCell => visitor.visit_table_cell(node),

        NodeType::FootnoteDefinition => visitor.visit_footnote_definition(node),
        NodeType::FootnoteReference => visitor.visit_footnote_reference(node),
    }?;

    visitor.exit_node(node)
}

/// Visits every child of `node` in document order.
#[inline]
pub fn walk_children<'a, V>(visitor: &mut V, node: &TxtNode<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    for child in node.children {
        walk_node(visitor, child)?;
    }
    ControlFlow::Continue(())
}
