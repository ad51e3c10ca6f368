//! Heading annotations.

use std::ops::ControlFlow;

use md2pw_ast::{LineIndex, NodeType, TxtNode, VisitResult, Visitor};
use tracing::trace;

use crate::extraction::{Extract, LineMap};
use crate::inline::inline_text;
use crate::{ConvertError, Extractor};

/// A heading, keyed by the line of its first text segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingAnnotation {
    /// Markdown depth, 1 to 6.
    pub level: u8,
    pub text: String,
}

/// Collects every heading whose first child is plain text.
///
/// All depths are recorded; the renderer decides which ones are rewritten.
pub struct HeadingExtractor<'i, 's> {
    index: &'i LineIndex<'s>,
    lines: LineMap<HeadingAnnotation>,
    error: Option<ConvertError>,
}

impl<'i, 's> HeadingExtractor<'i, 's> {
    pub fn new(index: &'i LineIndex<'s>) -> Self {
        Self {
            index,
            lines: LineMap::new(),
            error: None,
        }
    }
}

impl<'a> Visitor<'a> for HeadingExtractor<'_, '_> {
    fn visit_header(&mut self, node: &TxtNode<'a>) -> VisitResult {
        let Some(level) = node.depth() else {
            return ControlFlow::Continue(());
        };
        let Some(first) = node.first_child().filter(|c| c.node_type == NodeType::Str) else {
            trace!("Skipping heading at {} without leading text", node.span.start);
            return ControlFlow::Continue(());
        };

        match inline_text(node, self.index.source()) {
            Ok(inline) => {
                let line = self.index.line_of(first.span.start);
                self.lines.insert(
                    line,
                    HeadingAnnotation {
                        level,
                        text: inline.text,
                    },
                );
                ControlFlow::Continue(())
            }
            Err(e) => {
                self.error = Some(ConvertError::walk(Extractor::Heading, e));
                ControlFlow::Break(())
            }
        }
    }
}

impl<'a> Extract<'a> for HeadingExtractor<'_, '_> {
    type Output = LineMap<HeadingAnnotation>;
    const KIND: Extractor = Extractor::Heading;

    fn finish(self) -> Result<Self::Output, ConvertError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.lines),
        }
    }
}
