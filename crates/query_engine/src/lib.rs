//! Evaluate compiled selectors over a document.
//!
//! Two paths produce the same result set:
//!
//! - [`select`] walks the whole document in document order.
//! - [`select_indexed`] seeds candidates from a [`ClassIndex`] bucket when
//!   the selector pins a class token, then confirms each candidate with full
//!   predicate evaluation. The index narrows the candidate set; it never
//!   decides eligibility on its own, so a stale or missing index entry can
//!   only cost work, not correctness.

use element_index::ClassIndex;
use log::trace;
use markup::{Document, NodeKey};
use selectors::Selector;

/// All eligible element keys, in document order.
pub fn select(document: &Document, selector: &Selector) -> Vec<NodeKey> {
    document
        .elements()
        .filter(|(_, element)| selector.is_eligible(Some(*element)))
        .map(|(key, _)| key)
        .collect()
}

/// First eligible element key in document order.
pub fn select_first(document: &Document, selector: &Selector) -> Option<NodeKey> {
    document
        .elements()
        .find(|(_, element)| selector.is_eligible(Some(*element)))
        .map(|(key, _)| key)
}

/// All eligible element keys, pre-filtered through the class index.
///
/// Selectors without a class token fall back to the full scan. Candidates
/// come back in bucket (insertion) order.
pub fn select_indexed(
    document: &Document,
    index: &ClassIndex,
    selector: &Selector,
) -> Vec<NodeKey> {
    let Some(token) = selector.class_tokens().next() else {
        return select(document, selector);
    };
    let candidates = index.lookup(token);
    trace!("`{selector}`: {} candidates via `.{token}`", candidates.len());
    candidates
        .into_iter()
        .filter(|key| selector.is_eligible(document.element(*key)))
        .collect()
}

/// First eligible element among the class-index candidates.
pub fn select_first_indexed(
    document: &Document,
    index: &ClassIndex,
    selector: &Selector,
) -> Option<NodeKey> {
    let Some(token) = selector.class_tokens().next() else {
        return select_first(document, selector);
    };
    index
        .lookup(token)
        .into_iter()
        .find(|key| selector.is_eligible(document.element(*key)))
}
