//! Bump arena backing one document tree.
//!
//! Nodes, child slices, content segments and copied strings all live in the
//! arena and are released together when it is dropped.

use bumpalo::Bump;

/// Upper bound for the up-front reservation of [`AstArena::for_source`].
pub const MAX_PREALLOC: usize = 64 * 1024 * 1024;

/// Arena for the nodes of one parsed document.
///
/// ```rust
/// use md2pw_ast::{AstArena, Span};
///
/// let arena = AstArena::for_source(64);
/// let lines = arena.alloc_slice_copy(&[Span::new(0, 4)]);
/// assert_eq!(lines.len(), 1);
/// assert_eq!(arena.alloc_str("text"), "text");
/// ```
#[derive(Default)]
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena sized for a source of `source_len` bytes.
    ///
    /// Trees take a few times the source size; the reservation is capped at
    /// [`MAX_PREALLOC`] and grows on demand beyond that.
    pub fn for_source(source_len: usize) -> Self {
        Self {
            bump: Bump::with_capacity(initial_capacity(source_len)),
        }
    }

    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    pub fn alloc_slice_copy<T: Copy>(&self, slice: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(slice)
    }

    /// Moves the items of an exact-size iterator into the arena.
    pub fn alloc_slice_fill_iter<T, I>(&self, iter: I) -> &[T]
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.bump.alloc_slice_fill_iter(iter)
    }

    /// Bytes held by the arena, including unused chunk capacity.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

fn initial_capacity(source_len: usize) -> usize {
    source_len.saturating_mul(4).min(MAX_PREALLOC)
}
