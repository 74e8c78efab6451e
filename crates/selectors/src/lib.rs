//! Single-element selector engine: grammar, compiler, and matching.
//!
//! A [`Selector`] is compiled once from a CSS-like selector string (tag, id,
//! classes, attribute predicates, pseudo-classes — no combinators) and then
//! evaluated against any number of elements. Compilation is the only fallible
//! step; matching a compiled selector never fails, it only answers `false`.
//!
//! ```
//! use markup::Element;
//! use selectors::Selector;
//!
//! let selector = Selector::compile("div.highlight[data-state=active]").unwrap();
//! let element = Element::new("div")
//!     .with_attribute("class", "highlight selected")
//!     .with_attribute("data-state", "active");
//! assert!(selector.is_eligible(Some(&element)));
//! ```

mod error;
mod parser;
mod predicate;
mod pseudo;

pub use error::SelectorError;
pub use predicate::{AttributeMatcher, AttributePredicate};
pub use pseudo::{
    default_registry, PseudoClassFactory, PseudoClassPredicate, PseudoClassRegistry,
};

use core::fmt;
use markup::Element;
use std::sync::Arc;

/// A compiled, immutable selector.
///
/// Holds a tag constraint (`"*"` = any tag), attribute predicates in source
/// order, and pseudo-class predicates in source order. All predicates combine
/// with AND semantics. The predicate lists never change after compilation;
/// re-parsing means building a new `Selector`.
#[derive(Debug, Clone)]
pub struct Selector {
    /// Lowercase tag name, `"*"` for the wildcard.
    tag: String,
    attribute_predicates: Vec<AttributePredicate>,
    pseudo_predicates: Vec<Arc<dyn PseudoClassPredicate>>,
}

impl Selector {
    /// Compile `expression` against the built-in pseudo-class registry.
    pub fn compile(expression: &str) -> Result<Self, SelectorError> {
        parser::parse(expression, default_registry())
    }

    /// Compile `expression`, resolving pseudo-class names in `registry`.
    pub fn compile_in(
        expression: &str,
        registry: &PseudoClassRegistry,
    ) -> Result<Self, SelectorError> {
        parser::parse(expression, registry)
    }

    pub(crate) fn from_parts(
        tag: String,
        attribute_predicates: Vec<AttributePredicate>,
        pseudo_predicates: Vec<Arc<dyn PseudoClassPredicate>>,
    ) -> Self {
        Self {
            tag,
            attribute_predicates,
            pseudo_predicates,
        }
    }

    /// The tag constraint, lowercase; `"*"` matches any tag.
    #[inline]
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.tag == "*"
    }

    /// Attribute predicates in source order (including the implicit ones
    /// compiled from `#id` and `.class` parts).
    pub fn attribute_predicates(&self) -> &[AttributePredicate] {
        &self.attribute_predicates
    }

    pub fn pseudo_class_count(&self) -> usize {
        self.pseudo_predicates.len()
    }

    /// Class tokens pinned by token-membership predicates on `class`, in
    /// source order. An index can seed query candidates from any of these.
    pub fn class_tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.attribute_predicates
            .iter()
            .filter_map(AttributePredicate::class_token)
    }

    /// Whether `element` satisfies every constraint of this selector.
    ///
    /// `None` (absent element) is eligible for nothing and answers `false`
    /// without evaluating anything. Evaluation short-circuits left to right:
    /// tag first, then attribute predicates in source order, then
    /// pseudo-classes in source order.
    pub fn is_eligible(&self, element: Option<&Element>) -> bool {
        let Some(element) = element else {
            return false;
        };
        self.eval(element)
    }

    fn eval(&self, element: &Element) -> bool {
        if self.tag != "*" && !element.tag_name().eq_ignore_ascii_case(&self.tag) {
            return false;
        }
        self.attribute_predicates
            .iter()
            .all(|predicate| predicate.evaluate(element))
            && self
                .pseudo_predicates
                .iter()
                .all(|predicate| predicate.evaluate(element))
    }

    /// Lazily yield the eligible elements of `elements`, preserving input
    /// order. Nothing is evaluated until the iterator is driven; iterating a
    /// fresh `filter` call re-evaluates from scratch.
    pub fn filter<'sel, 'el, I>(&'sel self, elements: I) -> Filter<'sel, I::IntoIter>
    where
        I: IntoIterator<Item = &'el Element>,
    {
        Filter {
            selector: self,
            inner: elements.into_iter(),
        }
    }
}

/// Lazy iterator over the elements a selector accepts. See [`Selector::filter`].
pub struct Filter<'sel, I> {
    selector: &'sel Selector,
    inner: I,
}

impl<'sel, 'el, I> Iterator for Filter<'sel, I>
where
    I: Iterator<Item = &'el Element>,
{
    type Item = &'el Element;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find(|element| self.selector.eval(element))
    }
}

impl fmt::Display for Selector {
    /// Canonical form: uppercase tag, then attribute predicates in source
    /// order, then pseudo-classes in source order. Compiling the canonical
    /// form yields an eligibility-equivalent selector.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.tag.to_ascii_uppercase())?;
        for predicate in &self.attribute_predicates {
            write!(formatter, "{predicate}")?;
        }
        for pseudo in &self.pseudo_predicates {
            write!(formatter, "{}", pseudo.canonical())?;
        }
        Ok(())
    }
}
