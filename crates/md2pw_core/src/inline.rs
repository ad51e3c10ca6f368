//! Text resolution and inline markup reconstruction.
//!
//! Extracted text is always sliced from the source by span rather than
//! taken from parsed node values, so escapes and entities stay exactly as
//! the author wrote them.

use std::fmt;

use md2pw_ast::{NodeType, Span, TxtNode};

/// A span that cannot be sliced out of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanOutOfRange {
    pub span: Span,
    pub source_len: usize,
}

impl fmt::Display for SpanOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "span {}..{} does not index the source ({} bytes)",
            self.span.start, self.span.end, self.source_len
        )
    }
}

/// Slices `span` out of `source`.
pub fn resolve_text(span: Span, source: &str) -> Result<&str, SpanOutOfRange> {
    span.slice(source).ok_or(SpanOutOfRange {
        span,
        source_len: source.len(),
    })
}

/// Reconstructed inline text of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineText {
    pub text: String,
    /// False when reconstruction stopped at a line break.
    pub complete: bool,
}

/// Rebuilds the inline Markdown of `node`'s children, up to the first line
/// break.
///
/// Plain text and inline code are copied from the source, emphasis is
/// written back as `*…*` / `**…**` and links as `[text](url)`. Other nodes
/// contribute their children only.
pub fn inline_text(node: &TxtNode<'_>, source: &str) -> Result<InlineText, SpanOutOfRange> {
    let mut writer = InlineWriter {
        source,
        out: String::new(),
        stopped: false,
    };
    writer.children(node)?;
    Ok(InlineText {
        text: writer.out,
        complete: !writer.stopped,
    })
}

struct InlineWriter<'s> {
    source: &'s str,
    out: String,
    stopped: bool,
}

impl InlineWriter<'_> {
    fn children(&mut self, node: &TxtNode<'_>) -> Result<(), SpanOutOfRange> {
        for child in node.children {
            if self.stopped {
                break;
            }
            self.node(child)?;
        }
        Ok(())
    }

    fn node(&mut self, node: &TxtNode<'_>) -> Result<(), SpanOutOfRange> {
        match node.node_type {
            NodeType::Str | NodeType::Code => {
                let text = resolve_text(node.span, self.source)?;
                self.push(text);
            }
            NodeType::Emphasis | NodeType::Strong => {
                let marker = if node.emphasis_level() == Some(2) { "**" } else { "*" };
                self.push(marker);
                self.children(node)?;
                self.push(marker);
            }
            NodeType::Link => {
                self.push("[");
                self.children(node)?;
                self.push("](");
                self.push(node.url().unwrap_or_default());
                self.push(")");
            }
            NodeType::Break => self.stopped = true,
            _ => self.children(node)?,
        }
        Ok(())
    }

    fn push(&mut self, text: &str) {
        if self.stopped {
            return;
        }
        match text.find('\n') {
            Some(end) => {
                self.out.push_str(text[..end].trim_end_matches('\r'));
                self.stopped = true;
            }
            None => self.out.push_str(text),
        }
    }
}
