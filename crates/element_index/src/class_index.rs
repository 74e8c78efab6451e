//! The class-token index.

use crate::ElementIndex;
use log::{debug, trace};
use markup::{Attribute, Document, DocumentObserver, Element, NodeKey};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Maps each whitespace-separated token of an element's `class` attribute to
/// the elements currently carrying that token.
///
/// Buckets hold element keys in insertion order, each key at most once.
/// Tokens are case-sensitive. The index holds keys only — element lifetime
/// stays with the document.
///
/// Every structural change happens under one `RwLock` scoped to the index
/// instance, and [`lookup`](Self::lookup) copies the bucket out under the
/// read side, so readers never observe a half-applied change. Lookups are
/// snapshots at call time, not live views. The remove-old/add-new pair of a
/// class value change is two independently locked steps, never assumed
/// atomic.
#[derive(Default)]
pub struct ClassIndex {
    buckets: RwLock<FxHashMap<String, Vec<NodeKey>>>,
}

impl ClassIndex {
    /// An empty, unbound index. Most callers want [`attach`](Self::attach).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index over `document`: scan everything already present,
    /// then subscribe for the document's lifetime.
    pub fn attach(document: &mut Document) -> Arc<Self> {
        let index = Arc::new(Self::new());
        index.build(document);
        debug!(
            "class index attached: {} tokens over {} elements",
            index.token_count(),
            document.len()
        );
        document.subscribe(index.clone());
        index
    }

    /// The elements currently carrying `class_name`, in insertion order.
    ///
    /// Returns an owned snapshot; an unknown token yields an empty vector.
    /// Mutations applied after the call are not reflected in the returned
    /// snapshot.
    pub fn lookup(&self, class_name: &str) -> Vec<NodeKey> {
        self.buckets
            .read()
            .get(class_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of distinct tokens currently indexed.
    pub fn token_count(&self) -> usize {
        self.buckets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.read().is_empty()
    }

    /// Insert `key` under every token of `value`. Append-if-absent, so
    /// re-delivery or an overlap with an earlier value cannot duplicate an
    /// entry.
    fn insert_tokens(&self, key: NodeKey, value: &str) {
        let mut buckets = self.buckets.write();
        for token in value.split_whitespace() {
            let bucket = buckets.entry(token.to_string()).or_default();
            if !bucket.contains(&key) {
                bucket.push(key);
            }
        }
    }

    /// Remove `key` from every token of `value`. Absent entries are a no-op;
    /// emptied buckets are dropped.
    fn remove_tokens(&self, key: NodeKey, value: &str) {
        let mut buckets = self.buckets.write();
        for token in value.split_whitespace() {
            let now_empty = match buckets.get_mut(token) {
                Some(bucket) => {
                    bucket.retain(|candidate| *candidate != key);
                    bucket.is_empty()
                }
                None => false,
            };
            if now_empty {
                buckets.remove(token);
            }
        }
    }

    fn class_value(element: &Element) -> Option<&str> {
        element.attribute("class").and_then(Attribute::value)
    }
}

impl ElementIndex for ClassIndex {
    fn tracked_attribute(&self) -> Option<&str> {
        Some("class")
    }
}

impl DocumentObserver for ClassIndex {
    fn element_added(&self, key: NodeKey, element: &Element) {
        if let Some(value) = Self::class_value(element) {
            trace!("index {key} under `{value}`");
            self.insert_tokens(key, value);
        }
    }

    fn element_removed(&self, key: NodeKey, element: &Element) {
        if let Some(value) = Self::class_value(element) {
            trace!("unindex {key} from `{value}`");
            self.remove_tokens(key, value);
        }
    }

    fn attribute_added(&self, key: NodeKey, _element: &Element, attribute: &Attribute) {
        if !self.tracks(attribute.name()) {
            return;
        }
        if let Some(value) = attribute.value() {
            self.insert_tokens(key, value);
        }
    }

    fn attribute_removed(&self, key: NodeKey, _element: &Element, attribute: &Attribute) {
        if !self.tracks(attribute.name()) {
            return;
        }
        // The attribute carries its pre-removal value; the element itself has
        // already moved on.
        if let Some(value) = attribute.value() {
            self.remove_tokens(key, value);
        }
    }
}
