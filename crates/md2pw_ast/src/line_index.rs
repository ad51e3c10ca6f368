//! Byte offset to line number resolution.

use crate::Span;

/// Line table for a source document.
///
/// Lines are delimited by `\n` only and are numbered from zero, so a
/// document always has at least one (possibly empty) line and a trailing
/// newline opens a final empty line. This matches `str::split('\n')`.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    /// Byte offset at which each line starts.
    starts: Vec<u32>,
}

impl<'a> LineIndex<'a> {
    /// Builds the line table for `source`.
    pub fn new(source: &'a str) -> Self {
        let mut starts = Vec::with_capacity(source.len() / 32 + 1);
        starts.push(0);
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i as u32 + 1),
        );
        Self { source, starts }
    }

    /// Returns the source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Returns the zero-based line containing `offset`.
    ///
    /// This is the number of line breaks strictly before `offset`. Offsets
    /// past the end of the source resolve to the last line.
    pub fn line_of(&self, offset: u32) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// Returns the span of a line, excluding its line break.
    pub fn line_span(&self, line: usize) -> Option<Span> {
        let start = *self.starts.get(line)?;
        let end = match self.starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.source.len() as u32,
        };
        Some(Span::new(start, end))
    }

    /// Returns the text of a line, excluding its line break.
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        self.line_span(line)
            .map(|span| &self.source[span.range()])
    }

    /// Iterates over all lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        (0..self.line_count()).filter_map(|line| self.line_text(line))
    }
}
