//! Extraction coordinator.
//!
//! Runs the six extraction passes concurrently over one immutable tree.
//! Each pass owns its result until it hands it back over a one-shot
//! channel; nothing is shared mutably between passes.

use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender, bounded};
use md2pw_ast::visitor::walk_node;
use md2pw_ast::{LineIndex, TxtNode, Visitor};
use tracing::debug;

use crate::codeblock::{CodeBlockExtractor, CodeLine, FenceIndex};
use crate::config::ConverterConfig;
use crate::heading::{HeadingAnnotation, HeadingExtractor};
use crate::list::{ListItemAnnotation, ListItemExtractor};
use crate::substitution::{BoldExtractor, LinkExtractor, Substitution};
use crate::table::{TableExtractor, TableLine};
use crate::{ConvertError, Extractor};

/// Annotations keyed by zero-based source line.
pub type LineMap<T> = HashMap<usize, T>;

/// An extraction pass: a visitor that yields a result after the walk.
pub trait Extract<'a>: Visitor<'a> {
    type Output: Send;

    /// Tags the result when it is handed back to the coordinator.
    const KIND: Extractor;

    /// Returns the collected result, or the error that stopped the walk.
    fn finish(self) -> Result<Self::Output, ConvertError>;
}

/// Walks `root` with `extractor` and returns its result.
pub fn run<'a, E>(mut extractor: E, root: &TxtNode<'a>) -> Result<E::Output, ConvertError>
where
    E: Extract<'a>,
{
    // A break always comes with an error recorded by the extractor.
    let _ = walk_node(&mut extractor, root);
    extractor.finish()
}

/// Everything the renderer and the inline rewriter need.
#[derive(Debug, Default)]
pub struct Extraction {
    pub headings: LineMap<HeadingAnnotation>,
    pub list_items: LineMap<ListItemAnnotation>,
    pub code_lines: LineMap<CodeLine>,
    pub table_lines: LineMap<TableLine>,
    pub bolds: Vec<Substitution>,
    pub links: Vec<Substitution>,
}

/// A pass result, tagged with the pass that produced it.
type Handoff<T> = (Extractor, Result<T, ConvertError>);

/// Runs all passes over `root` and collects their results.
///
/// Blocks until every pass is done. When several passes fail, the error of
/// the pass listed first in [`Extractor::ALL`] is returned, so the same
/// input always fails the same way.
pub fn extract_all(
    root: &TxtNode<'_>,
    index: &LineIndex<'_>,
    config: &ConverterConfig,
) -> Result<Extraction, ConvertError> {
    let fences = FenceIndex::new(index);
    let source = index.source();
    let max_list_depth = config.max_list_depth;

    let (heading_tx, heading_rx) = bounded(1);
    let (list_tx, list_rx) = bounded(1);
    let (code_tx, code_rx) = bounded(1);
    let (bold_tx, bold_rx) = bounded(1);
    let (link_tx, link_rx) = bounded(1);
    let (table_tx, table_rx) = bounded(1);

    rayon::scope(|s| {
        s.spawn(move |_| hand_off(&heading_tx, HeadingExtractor::new(index), root));
        s.spawn(move |_| {
            hand_off(&list_tx, ListItemExtractor::new(index, max_list_depth), root)
        });
        s.spawn(move |_| hand_off(&code_tx, CodeBlockExtractor::new(index, fences), root));
        s.spawn(move |_| hand_off(&bold_tx, BoldExtractor::new(source), root));
        s.spawn(move |_| hand_off(&link_tx, LinkExtractor::new(source), root));
        s.spawn(move |_| hand_off(&table_tx, TableExtractor::new(index), root));
    });

    let mut failures = Vec::new();
    let extraction = Extraction {
        headings: receive(&heading_rx, &mut failures)?,
        list_items: receive(&list_rx, &mut failures)?,
        code_lines: receive(&code_rx, &mut failures)?,
        bolds: receive(&bold_rx, &mut failures)?,
        links: receive(&link_rx, &mut failures)?,
        table_lines: receive(&table_rx, &mut failures)?,
    };
    if let Some(error) = first_failure(failures) {
        return Err(error);
    }

    debug!(
        headings = extraction.headings.len(),
        list_items = extraction.list_items.len(),
        code_lines = extraction.code_lines.len(),
        table_lines = extraction.table_lines.len(),
        bolds = extraction.bolds.len(),
        links = extraction.links.len(),
        "Extraction finished"
    );

    Ok(extraction)
}

fn hand_off<'a, E>(tx: &Sender<Handoff<E::Output>>, extractor: E, root: &TxtNode<'a>)
where
    E: Extract<'a>,
{
    // The receiver outlives the scope, so the send cannot fail.
    let _ = tx.send((E::KIND, run(extractor, root)));
}

/// Takes one pass result. A failed pass is recorded in `failures` and
/// yields an empty output.
fn receive<T: Default>(
    rx: &Receiver<Handoff<T>>,
    failures: &mut Vec<(Extractor, ConvertError)>,
) -> Result<T, ConvertError> {
    let (kind, result) = rx
        .recv()
        .map_err(|_| ConvertError::internal("extraction pass finished without a result"))?;
    match result {
        Ok(output) => Ok(output),
        Err(e) => {
            debug!("{} extractor failed: {}", kind, e);
            failures.push((kind, e));
            Ok(T::default())
        }
    }
}

fn first_failure(failures: Vec<(Extractor, ConvertError)>) -> Option<ConvertError> {
    failures
        .into_iter()
        .min_by_key(|(kind, _)| Extractor::ALL.iter().position(|k| k == kind))
        .map(|(_, e)| e)
}
