//! List item annotations.
//!
//! Markers are derived from the item's nesting depth, clamped to the
//! configured maximum, and from the *outermost* enclosing list only: an
//! ordered list nested inside a bullet list still renders with `-`.

use std::ops::ControlFlow;

use md2pw_ast::visitor::walk_children;
use md2pw_ast::{LineIndex, Span, TxtNode, VisitResult, Visitor};

use crate::extraction::{Extract, LineMap};
use crate::inline::inline_text;
use crate::{ConvertError, Extractor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemAnnotation {
    /// Nesting depth, starting at 1.
    pub level: usize,
    pub ordered: bool,
    pub text: String,
}

pub struct ListItemExtractor<'i, 's> {
    index: &'i LineIndex<'s>,
    max_depth: usize,
    /// Ordered flags of the enclosing lists, outermost first.
    lists: Vec<bool>,
    lines: LineMap<ListItemAnnotation>,
    error: Option<ConvertError>,
}

impl<'i, 's> ListItemExtractor<'i, 's> {
    pub fn new(index: &'i LineIndex<'s>, max_depth: u8) -> Self {
        Self {
            index,
            max_depth: usize::from(max_depth.max(1)),
            lists: Vec::new(),
            lines: LineMap::new(),
            error: None,
        }
    }

    fn fail(&mut self, message: impl std::fmt::Display) -> VisitResult {
        self.error = Some(ConvertError::walk(Extractor::ListItem, message));
        ControlFlow::Break(())
    }
}

/// First content line of an item, following first children down to the
/// first block that has content lines.
fn first_content_line(item: &TxtNode<'_>) -> Result<Span, &'static str> {
    let mut node = item.first_child().ok_or("list item has no content")?;
    loop {
        if let Some(line) = node.lines.first() {
            return Ok(*line);
        }
        node = node
            .first_child()
            .ok_or("first block of list item has no content lines")?;
    }
}

impl<'a> Visitor<'a> for ListItemExtractor<'_, '_> {
    fn visit_list(&mut self, node: &TxtNode<'a>) -> VisitResult {
        self.lists.push(node.is_ordered().unwrap_or(false));
        let result = walk_children(self, node);
        self.lists.pop();
        result
    }

    fn visit_list_item(&mut self, node: &TxtNode<'a>) -> VisitResult {
        let content = match first_content_line(node) {
            Ok(span) => span,
            Err(message) => return self.fail(format!("{} (at byte {})", message, node.span.start)),
        };
        let Some(first) = node.first_child() else {
            return self.fail("list item has no content");
        };
        let text = match inline_text(first, self.index.source()) {
            Ok(inline) => inline.text,
            Err(e) => return self.fail(e),
        };

        let level = self.lists.len().clamp(1, self.max_depth);
        let ordered = self.lists.first().copied().unwrap_or(false);
        self.lines.insert(
            self.index.line_of(content.start),
            ListItemAnnotation {
                level,
                ordered,
                text,
            },
        );

        walk_children(self, node)
    }
}

impl<'a> Extract<'a> for ListItemExtractor<'_, '_> {
    type Output = LineMap<ListItemAnnotation>;
    const KIND: Extractor = Extractor::ListItem;

    fn finish(self) -> Result<Self::Output, ConvertError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.lines),
        }
    }
}
