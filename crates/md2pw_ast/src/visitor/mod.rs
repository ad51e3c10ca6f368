//! Read-only traversal of the document tree.
//!
//! - [`Visitor`] - per-node-type callbacks with child-walking defaults
//! - [`walk_node`] - dispatches a node to its `visit_*` method
//! - [`walk_children`] - visits the children of a node in order
//!
//! Extraction passes implement [`Visitor`] and keep their own state, such
//! as a stack of enclosing lists. Returning `ControlFlow::Break(())` from
//! any callback aborts the whole walk.
//!
//! # Example
//!
//! ```rust
//! use md2pw_ast::{AstArena, NodeData, NodeType, Span, TxtNode};
//! use md2pw_ast::visitor::{walk_children, walk_node, VisitResult, Visitor};
//! use std::ops::ControlFlow;
//!
//! #[derive(Default)]
//! struct HeadingDepths {
//!     depths: Vec<u8>,
//! }
//!
//! impl<'a> Visitor<'a> for HeadingDepths {
//!     fn visit_header(&mut self, node: &TxtNode<'a>) -> VisitResult {
//!         if let NodeData::Header(depth) = node.data {
//!             self.depths.push(depth);
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let arena = AstArena::new();
//! let h2 = TxtNode::new_parent(NodeType::Header, Span::new(0, 5), &[])
//!     .with_data(NodeData::header(2));
//! let children = arena.alloc_slice_copy(&[h2]);
//! let doc = TxtNode::new_parent(NodeType::Document, Span::new(0, 5), children);
//!
//! let mut visitor = HeadingDepths::default();
//! let _ = walk_node(&mut visitor, &doc);
//! assert_eq!(visitor.depths, vec![2]);
//! ```

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{walk_children, walk_node};
