//! # md2pw_ast
//!
//! Document tree definitions for md2pw.
//!
//! The tree is produced once per conversion by a parser (see `md2pw_parser`)
//! and is read-only afterwards, so several extraction passes can walk it at
//! the same time.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for Arena allocation
//! - All nodes of a document are allocated in a single arena
//! - Every node carries a byte [`Span`] into the original source
//! - Leaf blocks additionally carry per-line content segments
//!
//! ## Example
//!
//! ```rust
//! use md2pw_ast::{AstArena, TxtNode, NodeType, Span};
//!
//! let arena = AstArena::for_source(5);
//!
//! let text = TxtNode::new_text(NodeType::Str, Span::new(0, 5), arena.alloc_str("Hello"));
//! let doc = TxtNode::new_parent(
//!     NodeType::Document,
//!     Span::new(0, 5),
//!     arena.alloc_slice_copy(&[text]),
//! );
//! assert_eq!(doc.first_child().and_then(|n| n.text()), Some("Hello"));
//! ```

mod arena;
mod line_index;
mod node;
mod node_type;
mod span;
pub mod visitor;

pub use arena::{AstArena, MAX_PREALLOC};
pub use line_index::LineIndex;
pub use node::{CodeBlockData, LinkData, NodeData, TxtNode};
pub use node_type::NodeType;
pub use span::Span;

pub use visitor::{VisitResult, Visitor};
