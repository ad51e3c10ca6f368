//! Code block annotations.
//!
//! Fenced blocks with content get their fence lines from the content
//! segments: the opening fence sits right above the first content line and
//! the closing fence right below the last one. Empty blocks have no content
//! to anchor on, so their fences come from a [`FenceIndex`] built by
//! scanning the raw source once.

use std::ops::ControlFlow;

use md2pw_ast::{LineIndex, TxtNode, VisitResult, Visitor};
use tracing::{debug, trace};

use crate::extraction::{Extract, LineMap};
use crate::inline::resolve_text;
use crate::{ConvertError, Extractor};

/// Prefix PukiWiki uses for preformatted lines.
pub const CODE_INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLine {
    /// A fence delimiter; dropped from the output.
    Fence,
    /// A fenced content line, already prefixed with [`CODE_INDENT`].
    Content(String),
    /// A line of an indented code block; rendered unchanged.
    Verbatim,
}

/// Line numbers of every source line that starts with a fence token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceIndex {
    lines: Vec<usize>,
}

impl FenceIndex {
    pub fn new(index: &LineIndex<'_>) -> Self {
        let lines = index
            .lines()
            .enumerate()
            .filter(|(_, text)| is_fence_marker(text))
            .map(|(line, _)| line)
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    pub fn contains(&self, line: usize) -> bool {
        self.lines.binary_search(&line).is_ok()
    }

    /// Position of the first marker on or after `line`.
    fn position_from(&self, line: usize) -> usize {
        self.lines.partition_point(|&l| l < line)
    }
}

/// True for lines whose trimmed text starts with ```` ``` ```` or `~~~`.
/// Block quote markers are ignored.
pub fn is_fence_marker(line: &str) -> bool {
    let trimmed = line.trim_start_matches(|c: char| c.is_whitespace() || c == '>');
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

pub struct CodeBlockExtractor<'i, 's> {
    index: &'i LineIndex<'s>,
    fences: FenceIndex,
    /// Next unconsumed position in `fences`.
    cursor: usize,
    lines: LineMap<CodeLine>,
    error: Option<ConvertError>,
}

impl<'i, 's> CodeBlockExtractor<'i, 's> {
    pub fn new(index: &'i LineIndex<'s>, fences: FenceIndex) -> Self {
        Self {
            index,
            fences,
            cursor: 0,
            lines: LineMap::new(),
            error: None,
        }
    }

    fn fail(&mut self, message: impl std::fmt::Display) -> VisitResult {
        self.error = Some(ConvertError::walk(Extractor::CodeBlock, message));
        ControlFlow::Break(())
    }

    fn fenced_with_content(&mut self, node: &TxtNode<'_>) -> VisitResult {
        let mut first_line = None;
        let mut last_line = 0;
        for segment in node.lines {
            let text = match resolve_text(*segment, self.index.source()) {
                Ok(text) => text,
                Err(e) => return self.fail(e),
            };
            let line = self.index.line_of(segment.start);
            first_line.get_or_insert(line);
            last_line = line;
            self.lines
                .insert(line, CodeLine::Content(format!("{CODE_INDENT}{text}")));
        }

        let Some(open) = first_line.and_then(|line| line.checked_sub(1)) else {
            return self.fail(format!(
                "fenced code block at byte {} has content on its fence line",
                node.span.start
            ));
        };
        self.lines.insert(open, CodeLine::Fence);

        // Unclosed blocks run to the end of their container.
        let close = last_line + 1;
        if self.fences.contains(close) {
            self.lines.insert(close, CodeLine::Fence);
        }
        self.cursor = self.cursor.max(self.fences.position_from(close + 1));
        trace!(
            "Fenced {} block on lines {}..={}",
            node.lang().unwrap_or("plain"),
            open + 1,
            close + 1
        );
        ControlFlow::Continue(())
    }

    fn empty_fenced(&mut self, node: &TxtNode<'_>) {
        let start = self.index.line_of(node.span.start);
        let from = self.cursor.max(self.fences.position_from(start));

        match self.fences.lines.get(from..from + 2) {
            Some(&[open, close]) => {
                self.lines.insert(open, CodeLine::Fence);
                self.lines.insert(close, CodeLine::Fence);
                self.cursor = from + 2;
            }
            _ => {
                debug!(
                    "Empty code block at line {} has no matching fence pair",
                    start + 1
                );
                self.cursor = self.fences.lines.len();
            }
        }
    }
}

impl<'a> Visitor<'a> for CodeBlockExtractor<'_, '_> {
    fn visit_code_block(&mut self, node: &TxtNode<'a>) -> VisitResult {
        if !node.is_fenced() {
            for segment in node.lines {
                self.lines
                    .insert(self.index.line_of(segment.start), CodeLine::Verbatim);
            }
            return ControlFlow::Continue(());
        }

        if node.lines.is_empty() {
            self.empty_fenced(node);
            ControlFlow::Continue(())
        } else {
            self.fenced_with_content(node)
        }
    }
}

impl<'a> Extract<'a> for CodeBlockExtractor<'_, '_> {
    type Output = LineMap<CodeLine>;
    const KIND: Extractor = Extractor::CodeBlock;

    fn finish(self) -> Result<Self::Output, ConvertError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::run;
    use crate::test_utils::parse;
    use md2pw_ast::AstArena;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn code_lines(source: &str) -> Vec<(usize, CodeLine)> {
        let arena = AstArena::new();
        let doc = parse(&arena, source);
        let index = LineIndex::new(source);
        let fences = FenceIndex::new(&index);

        let mut found: Vec<_> = run(CodeBlockExtractor::new(&index, fences), &doc)
            .unwrap()
            .into_iter()
            .collect();
        found.sort_by_key(|(line, _)| *line);
        found
    }

    fn content(text: &str) -> CodeLine {
        CodeLine::Content(text.to_string())
    }

    #[rstest]
    #[case::backticks("```", true)]
    #[case::tildes("~~~rust", true)]
    #[case::indented("   ```go", true)]
    #[case::quoted("> ```", true)]
    #[case::two_backticks("``x``", false)]
    #[case::text("code", false)]
    fn detects_fence_markers(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_fence_marker(line), expected);
    }

    #[test]
    fn fence_index_lists_marker_lines() {
        let index = LineIndex::new("a\n```\nb\n```\n~~~\n~~~");
        assert_eq!(FenceIndex::new(&index).lines(), &[1, 3, 4, 5]);
    }

    #[test]
    fn block_with_content() {
        assert_eq!(
            code_lines("text\n```go\nfunc main() {\n\tfmt.Println(\"Hello\")\n}\n```"),
            vec![
                (1, CodeLine::Fence),
                (2, content("  func main() {")),
                (3, content("  \tfmt.Println(\"Hello\")")),
                (4, content("  }")),
                (5, CodeLine::Fence),
            ]
        );
    }

    #[test]
    fn empty_block_uses_fence_index() {
        assert_eq!(
            code_lines("```\n```"),
            vec![(0, CodeLine::Fence), (1, CodeLine::Fence)]
        );
    }

    #[test]
    fn interleaved_empty_and_filled_blocks_stay_in_sync() {
        let source = "```\nx\n```\n\n```\n```\n\n```\ny\n```\n\n```\n```";
        assert_eq!(
            code_lines(source),
            vec![
                (0, CodeLine::Fence),
                (1, content("  x")),
                (2, CodeLine::Fence),
                (4, CodeLine::Fence),
                (5, CodeLine::Fence),
                (7, CodeLine::Fence),
                (8, content("  y")),
                (9, CodeLine::Fence),
                (11, CodeLine::Fence),
                (12, CodeLine::Fence),
            ]
        );
    }

    #[test]
    fn backtick_lines_inside_tilde_block_are_content() {
        let source = "~~~\n```\n~~~\n\n```\n```";
        assert_eq!(
            code_lines(source),
            vec![
                (0, CodeLine::Fence),
                (1, content("  ```")),
                (2, CodeLine::Fence),
                (4, CodeLine::Fence),
                (5, CodeLine::Fence),
            ]
        );
    }

    #[test]
    fn unclosed_block_keeps_following_line() {
        assert_eq!(
            code_lines("```\ncode"),
            vec![(0, CodeLine::Fence), (1, content("  code"))]
        );
    }

    #[test]
    fn unmatched_empty_fence_is_left_alone() {
        assert!(code_lines("```").is_empty());
    }

    #[test]
    fn indented_code_is_verbatim() {
        assert_eq!(
            code_lines("para\n\n    let x = 1;"),
            vec![(2, CodeLine::Verbatim)]
        );
    }

    #[test]
    fn markdown_inside_fence_is_content() {
        assert_eq!(
            code_lines("```\n# not a heading\n- not a list\n```"),
            vec![
                (0, CodeLine::Fence),
                (1, content("  # not a heading")),
                (2, content("  - not a list")),
                (3, CodeLine::Fence),
            ]
        );
    }
}
