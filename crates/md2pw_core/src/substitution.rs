//! Inline substitutions for bold text and links.
//!
//! These are not tied to a line: each pair is a literal search string and
//! its replacement, applied to the rendered document afterwards.

use std::ops::ControlFlow;

use md2pw_ast::visitor::walk_children;
use md2pw_ast::{TxtNode, VisitResult, Visitor};
use tracing::trace;

use crate::extraction::Extract;
use crate::inline::{InlineText, SpanOutOfRange, inline_text};
use crate::{ConvertError, Extractor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub original: String,
    pub converted: String,
}

impl Substitution {
    pub fn new(original: impl Into<String>, converted: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            converted: converted.into(),
        }
    }

    /// `**text**` to `''text''`.
    pub fn bold(text: &str) -> Self {
        Self::new(format!("**{text}**"), format!("''{text}''"))
    }

    /// `[text](url)` to `[[text>url]]`.
    pub fn link(text: &str, url: &str) -> Self {
        Self::new(format!("[{text}]({url})"), format!("[[{text}>{url}]]"))
    }
}

/// Shared walk state of the two inline passes.
struct Collector<'s> {
    source: &'s str,
    kind: Extractor,
    pairs: Vec<Substitution>,
    error: Option<ConvertError>,
}

impl<'s> Collector<'s> {
    fn new(source: &'s str, kind: Extractor) -> Self {
        Self {
            source,
            kind,
            pairs: Vec::new(),
            error: None,
        }
    }

    fn text(&self, node: &TxtNode<'_>) -> Result<InlineText, SpanOutOfRange> {
        inline_text(node, self.source)
    }

    fn fail(&mut self, message: impl std::fmt::Display) -> VisitResult {
        self.error = Some(ConvertError::walk(self.kind, message));
        ControlFlow::Break(())
    }

    fn finish(self) -> Result<Vec<Substitution>, ConvertError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.pairs),
        }
    }
}

/// Collects `**strong**` text. Single-marker emphasis is ignored.
pub struct BoldExtractor<'s>(Collector<'s>);

impl<'s> BoldExtractor<'s> {
    pub fn new(source: &'s str) -> Self {
        Self(Collector::new(source, Extractor::Bold))
    }
}

impl<'a> Visitor<'a> for BoldExtractor<'_> {
    fn visit_strong(&mut self, node: &TxtNode<'a>) -> VisitResult {
        match self.0.text(node) {
            // A pair spanning lines can never match a rendered line.
            Ok(inline) if !inline.complete => {
                trace!("Skipping bold text across lines at {}", node.span.start)
            }
            Ok(inline) => self.0.pairs.push(Substitution::bold(&inline.text)),
            Err(e) => return self.0.fail(e),
        }
        walk_children(self, node)
    }
}

impl<'a> Extract<'a> for BoldExtractor<'_> {
    type Output = Vec<Substitution>;
    const KIND: Extractor = Extractor::Bold;

    fn finish(self) -> Result<Self::Output, ConvertError> {
        self.0.finish()
    }
}

/// Collects inline links.
pub struct LinkExtractor<'s>(Collector<'s>);

impl<'s> LinkExtractor<'s> {
    pub fn new(source: &'s str) -> Self {
        Self(Collector::new(source, Extractor::Link))
    }
}

impl<'a> Visitor<'a> for LinkExtractor<'_> {
    fn visit_link(&mut self, node: &TxtNode<'a>) -> VisitResult {
        let Some(url) = node.url() else {
            return self
                .0
                .fail(format!("link at byte {} has no destination", node.span.start));
        };
        match self.0.text(node) {
            Ok(inline) if !inline.complete => {
                trace!("Skipping link text across lines at {}", node.span.start)
            }
            Ok(inline) => self.0.pairs.push(Substitution::link(&inline.text, url)),
            Err(e) => return self.0.fail(e),
        }
        ControlFlow::Continue(())
    }
}

impl<'a> Extract<'a> for LinkExtractor<'_> {
    type Output = Vec<Substitution>;
    const KIND: Extractor = Extractor::Link;

    fn finish(self) -> Result<Self::Output, ConvertError> {
        self.0.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::run;
    use crate::test_utils::parse;
    use md2pw_ast::{AstArena, NodeType, Span};
    use pretty_assertions::assert_eq;

    fn bolds(source: &str) -> Vec<Substitution> {
        let arena = AstArena::new();
        let doc = parse(&arena, source);
        run(BoldExtractor::new(source), &doc).unwrap()
    }

    fn links(source: &str) -> Vec<Substitution> {
        let arena = AstArena::new();
        let doc = parse(&arena, source);
        run(LinkExtractor::new(source), &doc).unwrap()
    }

    #[test]
    fn bold_pairs_in_document_order() {
        assert_eq!(
            bolds("**one** and __two__\n\n- **three**"),
            vec![
                Substitution::new("**one**", "''one''"),
                Substitution::new("**two**", "''two''"),
                Substitution::new("**three**", "''three''"),
            ]
        );
    }

    #[test]
    fn italic_is_not_collected() {
        assert!(bolds("*italic* and _also_").is_empty());
    }

    #[test]
    fn bold_keeps_nested_markup() {
        assert_eq!(
            bolds("**see *this* [x](y)**"),
            vec![Substitution::new("**see *this* [x](y)**", "''see *this* [x](y)''")]
        );
    }

    #[test]
    fn bold_across_lines_is_skipped() {
        assert!(bolds("**a\nb**").is_empty());
    }

    #[test]
    fn link_pairs() {
        assert_eq!(
            links("[this is link](https://example.com) and [b](c)"),
            vec![
                Substitution::new(
                    "[this is link](https://example.com)",
                    "[[this is link>https://example.com]]"
                ),
                Substitution::new("[b](c)", "[[b>c]]"),
            ]
        );
    }

    #[test]
    fn link_text_keeps_emphasis() {
        assert_eq!(
            links("[**bold** link](u)"),
            vec![Substitution::new("[**bold** link](u)", "[[**bold** link>u]]")]
        );
    }

    #[test]
    fn link_without_destination_is_an_error() {
        let link = TxtNode::new_parent(NodeType::Link, Span::new(0, 3), &[]);

        let err = run(LinkExtractor::new("[a]"), &link).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Walk {
                extractor: Extractor::Link,
                ..
            }
        ));
    }
}
