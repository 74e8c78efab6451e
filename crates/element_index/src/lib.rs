//! Derived lookup structures over a live markup document.
//!
//! An element index subscribes to a document's mutation hooks and maintains
//! a lookup map that never diverges from the tree, at constant amortized
//! cost per change instead of a rescan per query. The [`ElementIndex`] trait
//! is the lifecycle contract; [`ClassIndex`] is the concrete index keyed by
//! class token.

pub mod class_index;

pub use class_index::ClassIndex;

use markup::{Document, DocumentObserver};

/// Lifecycle contract for a concrete element index.
///
/// A concrete index subscribes to one document's [`DocumentObserver`] hooks
/// and derives a lookup structure from them. Beyond the hooks themselves the
/// contract adds two things: the bind-time scan ([`build`](Self::build)),
/// and the attribute-name filter ([`tracks`](Self::tracks)) an index applies
/// before doing any work on an attribute hook.
///
/// Hook implementations never fail: an unknown element, an already-removed
/// entry, or a redundant removal is a quiet no-op, since delivery across
/// concurrently mutating threads is outside the index's control.
pub trait ElementIndex: DocumentObserver {
    /// The attribute name this index derives entries from, if any.
    fn tracked_attribute(&self) -> Option<&str>;

    /// Cheap name filter for attribute hooks, case-insensitive.
    fn tracks(&self, name: &str) -> bool {
        self.tracked_attribute()
            .is_some_and(|tracked| tracked.eq_ignore_ascii_case(name))
    }

    /// Bind-time scan: feed every element already present, in document
    /// order, through [`DocumentObserver::element_added`]. Called once,
    /// before subscribing; afterwards the hooks carry all changes.
    fn build(&self, document: &Document) {
        for (key, element) in document.elements() {
            self.element_added(key, element);
        }
    }
}
