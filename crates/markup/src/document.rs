//! The owning document tree and its synchronous observer dispatch.

use crate::element::{Attribute, Element};
use crate::NodeKey;
use log::{debug, trace, warn};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Observer protocol for document mutations.
///
/// The document invokes these hooks synchronously, at the point of mutation,
/// for every registered observer:
///
/// - [`element_added`](Self::element_added) fires after the element is part
///   of the tree; its current attribute state is ground truth.
/// - [`element_removed`](Self::element_removed) fires as the element leaves
///   the tree, with the attribute state it held at that moment.
/// - [`attribute_added`](Self::attribute_added) fires after the attribute
///   exists on the element.
/// - [`attribute_removed`](Self::attribute_removed) fires with the attribute
///   as it was immediately before removal; the value is already gone from
///   the element itself.
///
/// For any single element the document delivers
/// `added → attribute change* → removed` in real-time order, without
/// duplication. Hooks are infallible: implementations tolerate keys they have
/// never seen and redundant removals, and no-op instead of failing. Hooks
/// take `&self`; observers that maintain mutable state bring their own
/// locking.
pub trait DocumentObserver: Send + Sync {
    fn element_added(&self, key: NodeKey, element: &Element);

    fn element_removed(&self, key: NodeKey, element: &Element);

    fn attribute_added(&self, key: NodeKey, element: &Element, attribute: &Attribute);

    fn attribute_removed(&self, key: NodeKey, element: &Element, attribute: &Attribute);
}

/// A mutable tree of elements with stable keys and observer dispatch.
///
/// Elements are owned by the document; everything else (indexes, mirrors)
/// refers to them by [`NodeKey`] only. A changed attribute value is announced
/// as a remove-old/add-new hook pair — the two calls are independent, not an
/// atomic unit.
#[derive(Default)]
pub struct Document {
    elements: FxHashMap<NodeKey, Element>,
    /// Parent → ordered children. Top-level elements live under no parent.
    children: FxHashMap<NodeKey, Vec<NodeKey>>,
    parents: FxHashMap<NodeKey, NodeKey>,
    roots: Vec<NodeKey>,
    next_key: u64,
    observers: Vec<Arc<dyn DocumentObserver>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Existing elements are not replayed; observers
    /// that need them scan the document before subscribing.
    pub fn subscribe(&mut self, observer: Arc<dyn DocumentObserver>) {
        self.observers.push(observer);
    }

    /// Insert an element under `parent` (or at top level) and return its key.
    ///
    /// Fires `element_added` after the element is in the tree. An unknown
    /// parent key is tolerated: the element is inserted at top level.
    pub fn append_element(&mut self, parent: Option<NodeKey>, element: Element) -> NodeKey {
        let key = NodeKey::new(self.next_key);
        self.next_key += 1;

        match parent {
            Some(parent_key) if self.elements.contains_key(&parent_key) => {
                self.children.entry(parent_key).or_default().push(key);
                self.parents.insert(key, parent_key);
            }
            Some(parent_key) => {
                warn!("append under unknown parent {parent_key}, inserting {key} at top level");
                self.roots.push(key);
            }
            None => self.roots.push(key),
        }

        trace!("insert <{}> as {key}", element.tag_name());
        self.elements.insert(key, element);
        let inserted = &self.elements[&key];
        for observer in &self.observers {
            observer.element_added(key, inserted);
        }
        key
    }

    /// Remove an element and its whole subtree.
    ///
    /// Fires `element_removed` once per removed element, children before
    /// parents, each with the attribute state the element held on removal.
    /// Removing an unknown key is a no-op.
    pub fn remove_element(&mut self, key: NodeKey) {
        if !self.elements.contains_key(&key) {
            debug!("remove of unknown element {key} ignored");
            return;
        }

        // Detach from the parent (or root) list first so observers never see
        // a half-attached element through the document.
        if let Some(parent_key) = self.parents.remove(&key) {
            if let Some(siblings) = self.children.get_mut(&parent_key) {
                siblings.retain(|sibling| *sibling != key);
            }
        } else {
            self.roots.retain(|root| *root != key);
        }

        let mut removal_order = Vec::new();
        self.collect_subtree(key, &mut removal_order);
        // Children leave before their parents.
        for removed_key in removal_order.into_iter().rev() {
            self.children.remove(&removed_key);
            self.parents.remove(&removed_key);
            if let Some(element) = self.elements.remove(&removed_key) {
                trace!("remove <{}> {removed_key}", element.tag_name());
                for observer in &self.observers {
                    observer.element_removed(removed_key, &element);
                }
            }
        }
    }

    /// Set an attribute value.
    ///
    /// The first case-insensitive name match is replaced, announced as an
    /// `attribute_removed` (old pair) followed by an `attribute_added` (new
    /// pair). A name not yet present is appended and announced with a single
    /// `attribute_added`.
    pub fn set_attribute(&mut self, key: NodeKey, name: &str, value: impl Into<String>) {
        let Some(element) = self.elements.get_mut(&key) else {
            warn!("set_attribute on unknown element {key} ignored");
            return;
        };
        let value = value.into();

        if let Some(index) = element.position_of(name) {
            let old = element.attr_at(index).clone();
            element.attr_at_mut(index).set_value(Some(value));
            let element = &self.elements[&key];
            let new = element.attr_at(index);
            for observer in &self.observers {
                observer.attribute_removed(key, element, &old);
            }
            for observer in &self.observers {
                observer.attribute_added(key, element, new);
            }
        } else {
            element.push_attr(Attribute::new(name, value));
            let element = &self.elements[&key];
            if let Some(added) = element.attributes().last() {
                for observer in &self.observers {
                    observer.attribute_added(key, element, added);
                }
            }
        }
    }

    /// Remove the first attribute matching `name` (case-insensitive).
    ///
    /// Fires `attribute_removed` with the pre-removal name/value pair. An
    /// absent name or unknown key is a no-op.
    pub fn remove_attribute(&mut self, key: NodeKey, name: &str) {
        let Some(element) = self.elements.get_mut(&key) else {
            debug!("remove_attribute on unknown element {key} ignored");
            return;
        };
        let Some(index) = element.position_of(name) else {
            return;
        };
        let removed = element.remove_attr_at(index);
        let element = &self.elements[&key];
        for observer in &self.observers {
            observer.attribute_removed(key, element, &removed);
        }
    }

    #[inline]
    pub fn element(&self, key: NodeKey) -> Option<&Element> {
        self.elements.get(&key)
    }

    #[inline]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.elements.contains_key(&key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Parent of an element, if it is not at top level.
    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.parents.get(&key).copied()
    }

    /// Keys in document order (depth-first, siblings in insertion order).
    pub fn keys(&self) -> Vec<NodeKey> {
        let mut order = Vec::with_capacity(self.elements.len());
        for root in &self.roots {
            self.collect_subtree(*root, &mut order);
        }
        order
    }

    /// Elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeKey, &Element)> + '_ {
        self.keys()
            .into_iter()
            .filter_map(|key| self.elements.get(&key).map(|element| (key, element)))
    }

    fn collect_subtree(&self, key: NodeKey, out: &mut Vec<NodeKey>) {
        out.push(key);
        if let Some(child_keys) = self.children.get(&key) {
            for child in child_keys {
                self.collect_subtree(*child, out);
            }
        }
    }
}
