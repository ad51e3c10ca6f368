//! The `Visitor` trait.

use std::ops::ControlFlow;

use crate::TxtNode;

use super::walk::{walk_children, walk_node};

/// Result of a visitor callback.
///
/// `Continue(())` keeps walking, `Break(())` stops the traversal.
pub type VisitResult = ControlFlow<()>;

/// Callbacks for a read-only walk over the tree.
///
/// Container callbacks default to [`walk_children`]; leaf callbacks default
/// to `Continue`. Override only the node types a pass cares about, and call
/// [`walk_children`] yourself when an override still needs to descend.
pub trait Visitor<'a>: Sized {
    /// Called before a node is dispatched.
    #[inline]
    fn enter_node(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after a node and its subtree were visited.
    #[inline]
    fn exit_node(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    #[inline]
    fn visit_node(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_node(self, node)
    }

    // Blocks

    fn visit_document(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_paragraph(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_header(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_block_quote(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_list(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_list_item(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    /// Code blocks are leaves; their content lives in `lines`.
    fn visit_code_block(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_horizontal_rule(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_html(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    // Inlines

    fn visit_str(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_break(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_emphasis(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_strong(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_delete(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_code(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_link(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_image(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    // References

    fn visit_link_reference(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_image_reference(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_definition(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    // Tables

    fn visit_table(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    /// The first row of a table.
    fn visit_table_header(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_table_row(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_table_cell(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    // Footnotes

    fn visit_footnote_definition(&mut self, node: &TxtNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_footnote_reference(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }
}
