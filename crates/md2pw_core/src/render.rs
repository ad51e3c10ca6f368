//! Line merger: turns source lines plus annotations into wiki lines.

use std::borrow::Cow;
use std::ops::Range;

use md2pw_ast::LineIndex;

use crate::codeblock::CodeLine;
use crate::config::ConverterConfig;
use crate::extraction::Extraction;
use crate::table::{TableLine, is_delimiter_row};

/// Block-level output, before inline substitutions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub text: String,
    /// Byte ranges of code lines in `text`. Inline rewriting skips them.
    pub protected: Vec<Range<usize>>,
}

enum Rendered<'s> {
    Dropped,
    Text(Cow<'s, str>),
    Code(Cow<'s, str>),
}

/// Renders every source line, highest precedence first: code block,
/// heading (up to `max_heading_level`), list item, table, then the line
/// itself. Lines are joined with `\n` and no newline is added at the end.
pub fn render(
    index: &LineIndex<'_>,
    extraction: &Extraction,
    config: &ConverterConfig,
) -> RenderedDocument {
    let mut text = String::with_capacity(index.source().len());
    let mut protected = Vec::new();
    let mut first = true;

    for (line, source_line) in index.lines().enumerate() {
        let (content, is_code) = match render_line(line, source_line, extraction, config) {
            Rendered::Dropped => continue,
            Rendered::Text(content) => (content, false),
            Rendered::Code(content) => (content, true),
        };
        let content = keep_carriage_return(content, source_line);

        if !first {
            text.push('\n');
        }
        first = false;

        let start = text.len();
        text.push_str(&content);
        if is_code {
            protected.push(start..text.len());
        }
    }

    RenderedDocument { text, protected }
}

/// Rewritten lines of a CRLF source end in `\r` like the lines kept as is.
fn keep_carriage_return<'s>(content: Cow<'s, str>, source_line: &str) -> Cow<'s, str> {
    if source_line.ends_with('\r') && !content.ends_with('\r') {
        let mut owned = content.into_owned();
        owned.push('\r');
        Cow::Owned(owned)
    } else {
        content
    }
}

fn render_line<'s>(
    line: usize,
    source_line: &'s str,
    extraction: &Extraction,
    config: &ConverterConfig,
) -> Rendered<'s> {
    if let Some(code) = extraction.code_lines.get(&line) {
        return match code {
            CodeLine::Fence => Rendered::Dropped,
            CodeLine::Content(content) => Rendered::Code(Cow::Owned(content.clone())),
            CodeLine::Verbatim => Rendered::Code(Cow::Borrowed(source_line)),
        };
    }

    if let Some(heading) = extraction
        .headings
        .get(&line)
        .filter(|h| h.level <= config.max_heading_level)
    {
        let stars = "*".repeat(usize::from(heading.level));
        return Rendered::Text(Cow::Owned(format!("{} {}", stars, heading.text)));
    }

    if let Some(item) = extraction.list_items.get(&line) {
        let marker = if item.ordered { "+" } else { "-" };
        return Rendered::Text(Cow::Owned(format!(
            "{}{}",
            marker.repeat(item.level),
            item.text
        )));
    }

    if let Some(table) = extraction.table_lines.get(&line) {
        return match table {
            TableLine::Separator
                if config.verify_table_separator && !is_delimiter_row(source_line) =>
            {
                Rendered::Text(Cow::Borrowed(source_line))
            }
            TableLine::Separator => Rendered::Dropped,
            row => Rendered::Text(Cow::Owned(row.render())),
        };
    }

    Rendered::Text(Cow::Borrowed(source_line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::HeadingAnnotation;
    use crate::list::ListItemAnnotation;
    use pretty_assertions::assert_eq;

    fn heading(level: u8, text: &str) -> HeadingAnnotation {
        HeadingAnnotation {
            level,
            text: text.to_string(),
        }
    }

    fn item(level: usize, ordered: bool, text: &str) -> ListItemAnnotation {
        ListItemAnnotation {
            level,
            ordered,
            text: text.to_string(),
        }
    }

    #[test]
    fn unannotated_lines_pass_through() {
        let index = LineIndex::new("a\n\nb\n");
        let rendered = render(&index, &Extraction::default(), &ConverterConfig::default());

        assert_eq!(rendered.text, "a\n\nb\n");
        assert!(rendered.protected.is_empty());
    }

    #[test]
    fn code_wins_over_everything() {
        let index = LineIndex::new("# x");
        let mut extraction = Extraction::default();
        extraction.code_lines.insert(0, CodeLine::Content("  # x".into()));
        extraction.headings.insert(0, heading(1, "x"));
        extraction.list_items.insert(0, item(1, false, "x"));
        extraction.table_lines.insert(0, TableLine::Row(vec!["x".into()]));

        let rendered = render(&index, &extraction, &ConverterConfig::default());
        assert_eq!(rendered.text, "  # x");
        assert_eq!(rendered.protected, vec![0..5]);
    }

    #[test]
    fn heading_wins_over_list() {
        let index = LineIndex::new("- # Title");
        let mut extraction = Extraction::default();
        extraction.headings.insert(0, heading(1, "Title"));
        extraction.list_items.insert(0, item(1, false, "# Title"));

        let rendered = render(&index, &extraction, &ConverterConfig::default());
        assert_eq!(rendered.text, "* Title");
    }

    #[test]
    fn deep_heading_falls_through_to_list() {
        let index = LineIndex::new("- #### Deep");
        let mut extraction = Extraction::default();
        extraction.headings.insert(0, heading(4, "Deep"));
        extraction.list_items.insert(0, item(1, false, "#### Deep"));

        let rendered = render(&index, &extraction, &ConverterConfig::default());
        assert_eq!(rendered.text, "-#### Deep");
    }

    #[test]
    fn configured_heading_limit() {
        let index = LineIndex::new("## Two");
        let mut extraction = Extraction::default();
        extraction.headings.insert(0, heading(2, "Two"));
        let config = ConverterConfig {
            max_heading_level: 1,
            ..ConverterConfig::default()
        };

        assert_eq!(render(&index, &extraction, &config).text, "## Two");
    }

    #[test]
    fn list_markers() {
        let index = LineIndex::new("a\nb\nc");
        let mut extraction = Extraction::default();
        extraction.list_items.insert(0, item(1, true, "a"));
        extraction.list_items.insert(1, item(2, true, "b"));
        extraction.list_items.insert(2, item(3, false, "c"));

        let rendered = render(&index, &extraction, &ConverterConfig::default());
        assert_eq!(rendered.text, "+a\n++b\n---c");
    }

    #[test]
    fn dropped_lines_leave_no_gap() {
        let index = LineIndex::new("```\ncode\n```");
        let mut extraction = Extraction::default();
        extraction.code_lines.insert(0, CodeLine::Fence);
        extraction.code_lines.insert(1, CodeLine::Content("  code".into()));
        extraction.code_lines.insert(2, CodeLine::Fence);

        let rendered = render(&index, &extraction, &ConverterConfig::default());
        assert_eq!(rendered.text, "  code");
        assert_eq!(rendered.protected, vec![0..6]);
    }

    #[test]
    fn separator_is_dropped_unconditionally_by_default() {
        let index = LineIndex::new("| A |\nnot a delimiter");
        let mut extraction = Extraction::default();
        extraction.table_lines.insert(0, TableLine::Header(vec!["A".into()]));
        extraction.table_lines.insert(1, TableLine::Separator);

        let rendered = render(&index, &extraction, &ConverterConfig::default());
        assert_eq!(rendered.text, "|~ A |");
    }

    #[test]
    fn verified_separator_keeps_content_lines() {
        let index = LineIndex::new("| A |\nnot a delimiter\n| A |\n|---|");
        let mut extraction = Extraction::default();
        extraction.table_lines.insert(0, TableLine::Header(vec!["A".into()]));
        extraction.table_lines.insert(1, TableLine::Separator);
        extraction.table_lines.insert(2, TableLine::Header(vec!["A".into()]));
        extraction.table_lines.insert(3, TableLine::Separator);
        let config = ConverterConfig {
            verify_table_separator: true,
            ..ConverterConfig::default()
        };

        let rendered = render(&index, &extraction, &config);
        assert_eq!(rendered.text, "|~ A |\nnot a delimiter\n|~ A |");
    }

    #[test]
    fn rewritten_lines_keep_crlf_endings() {
        let index = LineIndex::new("# T\r\n- x\r\n```\r\ncode\r\n```\r\n");
        let mut extraction = Extraction::default();
        extraction.headings.insert(0, heading(1, "T"));
        extraction.list_items.insert(1, item(1, false, "x"));
        extraction.code_lines.insert(2, CodeLine::Fence);
        extraction.code_lines.insert(3, CodeLine::Content("  code\r".into()));
        extraction.code_lines.insert(4, CodeLine::Fence);

        let rendered = render(&index, &extraction, &ConverterConfig::default());
        assert_eq!(rendered.text, "* T\r\n-x\r\n  code\r\n");
    }

    #[test]
    fn verbatim_code_is_protected() {
        let index = LineIndex::new("text\n    code");
        let mut extraction = Extraction::default();
        extraction.code_lines.insert(1, CodeLine::Verbatim);

        let rendered = render(&index, &extraction, &ConverterConfig::default());
        assert_eq!(rendered.text, "text\n    code");
        assert_eq!(rendered.protected, vec![5..13]);
    }
}
