//! Table annotations.

use std::ops::ControlFlow;

use md2pw_ast::{LineIndex, NodeType, TxtNode, VisitResult, Visitor};

use crate::extraction::{Extract, LineMap};
use crate::inline::inline_text;
use crate::{ConvertError, Extractor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLine {
    Header(Vec<String>),
    Row(Vec<String>),
    /// The delimiter row below a header. Recorded at `header line + 1`
    /// without looking at the line itself.
    Separator,
}

impl TableLine {
    /// Renders a header or data row; the separator renders as nothing.
    pub fn render(&self) -> String {
        let (cells, marker) = match self {
            TableLine::Header(cells) => (cells, "~ "),
            TableLine::Row(cells) => (cells, " "),
            TableLine::Separator => return String::new(),
        };

        let mut out = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i == 0 {
                out.push('|');
            }
            out.push_str(marker);
            out.push_str(cell);
            out.push_str(" |");
        }
        out
    }
}

/// True if `line` could be a GFM delimiter row: only pipes, dashes, colons
/// and whitespace, with at least one dash.
pub fn is_delimiter_row(line: &str) -> bool {
    line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

fn first_text<'n, 'a>(node: &'n TxtNode<'a>) -> Option<&'n TxtNode<'a>> {
    node.children.iter().find_map(|child| {
        if child.node_type == NodeType::Str {
            Some(child)
        } else {
            first_text(child)
        }
    })
}

pub struct TableExtractor<'i, 's> {
    index: &'i LineIndex<'s>,
    lines: LineMap<TableLine>,
    error: Option<ConvertError>,
}

impl<'i, 's> TableExtractor<'i, 's> {
    pub fn new(index: &'i LineIndex<'s>) -> Self {
        Self {
            index,
            lines: LineMap::new(),
            error: None,
        }
    }

    /// Line of the first text segment inside the cells of `row`.
    fn row_line(&self, row: &TxtNode<'_>) -> Option<usize> {
        row.children
            .iter()
            .filter(|cell| cell.node_type == NodeType::TableCell)
            .find_map(first_text)
            .map(|text| self.index.line_of(text.span.start))
    }

    fn cells(&self, row: &TxtNode<'_>) -> Result<Vec<String>, ConvertError> {
        row.children
            .iter()
            .filter(|cell| cell.node_type == NodeType::TableCell)
            .map(|cell| {
                inline_text(cell, self.index.source())
                    .map(|inline| inline.text.trim().to_string())
                    .map_err(|e| ConvertError::walk(Extractor::Table, e))
            })
            .collect()
    }
}

impl<'a> Visitor<'a> for TableExtractor<'_, '_> {
    fn visit_table(&mut self, node: &TxtNode<'a>) -> VisitResult {
        for row in node.children {
            let header = match row.node_type {
                NodeType::TableHeader => true,
                NodeType::TableRow => false,
                _ => continue,
            };
            let Some(line) = self.row_line(row) else {
                continue;
            };
            let cells = match self.cells(row) {
                Ok(cells) => cells,
                Err(e) => {
                    self.error = Some(e);
                    return ControlFlow::Break(());
                }
            };

            if header {
                self.lines.insert(line, TableLine::Header(cells));
                self.lines.insert(line + 1, TableLine::Separator);
            } else {
                self.lines.insert(line, TableLine::Row(cells));
            }
        }
        ControlFlow::Continue(())
    }
}

impl<'a> Extract<'a> for TableExtractor<'_, '_> {
    type Output = LineMap<TableLine>;
    const KIND: Extractor = Extractor::Table;

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

    fn table_lines(source: &str) -> Vec<(usize, TableLine)> {
        let arena = AstArena::new();
        let doc = parse(&arena, source);
        let index = LineIndex::new(source);

        let mut found: Vec<_> = run(TableExtractor::new(&index), &doc)
            .unwrap()
            .into_iter()
            .collect();
        found.sort_by_key(|(line, _)| *line);
        found
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn header_separator_and_rows() {
        let source = "| A | B |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |";
        assert_eq!(
            table_lines(source),
            vec![
                (0, TableLine::Header(cells(&["A", "B"]))),
                (1, TableLine::Separator),
                (2, TableLine::Row(cells(&["1", "2"]))),
                (3, TableLine::Row(cells(&["3", "4"]))),
            ]
        );
    }

    #[test]
    fn cells_keep_inline_markup() {
        let source = "| Name | Link |\n|---|---|\n| **x** | [a](b) |";
        let found = table_lines(source);
        assert_eq!(found[2], (2, TableLine::Row(cells(&["**x**", "[a](b)"]))));
    }

    #[test]
    fn row_without_text_is_skipped() {
        let source = "| A | B |\n|---|---|\n|   |   |\n| 1 | 2 |";
        let found = table_lines(source);
        assert_eq!(found.len(), 3);
        assert_eq!(found[2].0, 3);
    }

    #[test]
    fn table_in_document_body() {
        let source = "# T\n\n| H |\n| - |\n| v |";
        let lines: Vec<usize> = table_lines(source).into_iter().map(|(l, _)| l).collect();
        assert_eq!(lines, vec![2, 3, 4]);
    }

    #[rstest]
    #[case::header(TableLine::Header(cells(&["A", "B"])), "|~ A |~ B |")]
    #[case::row(TableLine::Row(cells(&["1", "2"])), "| 1 | 2 |")]
    #[case::single_cell(TableLine::Row(cells(&["x"])), "| x |")]
    #[case::separator(TableLine::Separator, "")]
    #[case::no_cells(TableLine::Row(Vec::new()), "")]
    fn renders_rows(#[case] line: TableLine, #[case] expected: &str) {
        assert_eq!(line.render(), expected);
    }

    #[rstest]
    #[case::plain("|---|---|", true)]
    #[case::aligned("| :-- | --: |", true)]
    #[case::bare("---", true)]
    #[case::content("| 1 | 2 |", false)]
    #[case::pipes_only("| |", false)]
    fn detects_delimiter_rows(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_delimiter_row(line), expected);
    }
}
