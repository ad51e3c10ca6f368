//! Inline rewriter.
//!
//! Each substitution replaces only the first occurrence of its original
//! text, in collection order. Repeated identical bold or link text is
//! therefore only partly converted; this is intended.

use std::ops::Range;

use tracing::trace;

use crate::render::RenderedDocument;
use crate::substitution::Substitution;

/// Applies bold substitutions, then link substitutions, to `document`.
///
/// Occurrences inside code lines are never replaced. When a bold
/// replacement succeeds, the same replacement is applied to the pending
/// link pairs so that links containing bold text still match.
pub fn rewrite(document: RenderedDocument, bolds: &[Substitution], links: &[Substitution]) -> String {
    let mut rewriter = InlineRewriter::new(document);
    let mut links = links.to_vec();

    for bold in bolds {
        if rewriter.replace_first(bold) {
            for link in &mut links {
                replace_first_in(&mut link.original, bold);
                replace_first_in(&mut link.converted, bold);
            }
        }
    }
    for link in &links {
        rewriter.replace_first(link);
    }

    rewriter.into_text()
}

fn replace_first_in(text: &mut String, pair: &Substitution) {
    if let Some(start) = text.find(pair.original.as_str()) {
        text.replace_range(start..start + pair.original.len(), &pair.converted);
    }
}

pub struct InlineRewriter {
    text: String,
    protected: Vec<Range<usize>>,
}

impl InlineRewriter {
    pub fn new(document: RenderedDocument) -> Self {
        Self {
            text: document.text,
            protected: document.protected,
        }
    }

    fn is_protected(&self, range: &Range<usize>) -> bool {
        self.protected
            .iter()
            .any(|p| p.start < range.end && range.start < p.end)
    }

    /// Replaces the first unprotected occurrence of `pair.original`.
    ///
    /// Returns whether a replacement was made.
    pub fn replace_first(&mut self, pair: &Substitution) -> bool {
        let len = pair.original.len();
        if len == 0 {
            return false;
        }

        let found = self
            .text
            .match_indices(pair.original.as_str())
            .map(|(start, _)| start..start + len)
            .find(|range| !self.is_protected(range));
        let Some(range) = found else {
            trace!("No unprotected occurrence of {:?}", pair.original);
            return false;
        };

        let end = range.end;
        self.text.replace_range(range, &pair.converted);

        let new_len = pair.converted.len();
        for p in self.protected.iter_mut().filter(|p| p.start >= end) {
            p.start = p.start + new_len - len;
            p.end = p.end + new_len - len;
        }
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(text: &str, protected: Vec<Range<usize>>) -> RenderedDocument {
        RenderedDocument {
            text: text.to_string(),
            protected,
        }
    }

    #[test]
    fn replaces_first_occurrence_only() {
        let out = rewrite(
            doc("**x** and **x**", vec![]),
            &[Substitution::bold("x")],
            &[],
        );
        assert_eq!(out, "''x'' and **x**");
    }

    #[test]
    fn one_pair_per_occurrence_converts_both() {
        let out = rewrite(
            doc("**x** and **x**", vec![]),
            &[Substitution::bold("x"), Substitution::bold("x")],
            &[],
        );
        assert_eq!(out, "''x'' and ''x''");
    }

    #[test]
    fn skips_protected_ranges() {
        let out = rewrite(
            doc("  **x**\n**x**", vec![0..7]),
            &[Substitution::bold("x")],
            &[],
        );
        assert_eq!(out, "  **x**\n''x''");
    }

    #[test]
    fn shifts_protected_ranges_after_replacement() {
        let mut rewriter = InlineRewriter::new(doc("[a](b)\n  [a](b)\n[a](b)", vec![7..15]));

        assert!(rewriter.replace_first(&Substitution::link("a", "b")));
        assert_eq!(rewriter.text(), "[[a>b]]\n  [a](b)\n[a](b)");
        assert!(rewriter.replace_first(&Substitution::link("a", "b")));
        assert_eq!(rewriter.text(), "[[a>b]]\n  [a](b)\n[[a>b]]");
    }

    #[test]
    fn shrinking_replacement_shifts_ranges_back() {
        let mut rewriter = InlineRewriter::new(doc("a-long-key\n  code key", vec![11..21]));

        assert!(rewriter.replace_first(&Substitution::new("a-long-key", "k")));
        assert!(!rewriter.replace_first(&Substitution::new("key", "K")));
        assert_eq!(rewriter.into_text(), "k\n  code key");
    }

    #[test]
    fn empty_original_is_ignored() {
        let mut rewriter = InlineRewriter::new(doc("text", vec![]));
        assert!(!rewriter.replace_first(&Substitution::new("", "x")));
        assert_eq!(rewriter.text(), "text");
    }

    #[test]
    fn bold_inside_link() {
        let out = rewrite(
            doc("[**b**](u)", vec![]),
            &[Substitution::bold("b")],
            &[Substitution::link("**b**", "u")],
        );
        assert_eq!(out, "[[''b''>u]]");
    }

    #[test]
    fn link_inside_bold() {
        let out = rewrite(
            doc("**[a](u)**", vec![]),
            &[Substitution::bold("[a](u)")],
            &[Substitution::link("a", "u")],
        );
        assert_eq!(out, "''[[a>u]]''");
    }

    #[test]
    fn missing_text_is_left_alone() {
        let out = rewrite(doc("plain", vec![]), &[Substitution::bold("x")], &[]);
        assert_eq!(out, "plain");
    }
}
