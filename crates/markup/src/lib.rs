//! Mutable markup element tree and mutation-notification primitives.
//!
//! A [`Document`] owns a tree of [`Element`]s, each identified by a stable
//! [`NodeKey`]. Every structural or attribute mutation performed through the
//! document is announced synchronously to registered [`DocumentObserver`]s,
//! which is how derived structures (lookup indexes, mirrors) stay in sync
//! without rescanning the tree.

pub mod document;
pub mod element;

pub use document::{Document, DocumentObserver};
pub use element::{Attribute, Element};

/// A 64-bit stable key identifying an element within its owning document.
///
/// Keys are minted monotonically and never reused, so holding a key for a
/// removed element is harmless: lookups simply return `None`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct NodeKey(u64);

impl NodeKey {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw key value, for diagnostics.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for NodeKey {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}
