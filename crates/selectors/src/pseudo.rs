//! Named pseudo-class predicates and the registry that resolves them.
//!
//! The supported set is closed and explicit: a pseudo-class exists only if a
//! factory for its name has been registered. Resolution is a plain map
//! lookup, so a selector string can never conjure behavior that was not
//! wired in up front.

use crate::error::SelectorError;
use core::fmt;
use markup::Element;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A named boolean condition on a single element, beyond tag and attribute
/// matching.
pub trait PseudoClassPredicate: fmt::Debug + Send + Sync {
    fn evaluate(&self, element: &Element) -> bool;

    /// Rendering used in a selector's canonical form, including the leading
    /// colon (`":checked"`, `":lang(en)"`).
    fn canonical(&self) -> String;
}

/// Constructor for a pseudo-class predicate. Receives the parenthesized
/// argument when one was written (`:lang(en)` → `Some("en")`).
pub type PseudoClassFactory =
    fn(Option<&str>) -> Result<Arc<dyn PseudoClassPredicate>, SelectorError>;

/// Name → factory table. Names are case-insensitive.
#[derive(Default)]
pub struct PseudoClassRegistry {
    factories: FxHashMap<String, PseudoClassFactory>,
}

impl PseudoClassRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in predicates.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("checked", |arg| flag("checked", "checked", true, arg));
        registry.register("disabled", |arg| flag("disabled", "disabled", true, arg));
        registry.register("enabled", |arg| flag("enabled", "disabled", false, arg));
        registry.register("required", |arg| flag("required", "required", true, arg));
        registry.register("optional", |arg| flag("optional", "required", false, arg));
        registry.register("read-only", |arg| flag("read-only", "readonly", true, arg));
        registry.register("read-write", |arg| flag("read-write", "readonly", false, arg));
        registry.register("link", link_factory);
        registry.register("lang", lang_factory);
        registry
    }

    /// Register (or replace) a factory under `name`.
    pub fn register(&mut self, name: &str, factory: PseudoClassFactory) {
        self.factories.insert(name.to_ascii_lowercase(), factory);
    }

    /// Resolve `name` and build a predicate from `argument`.
    pub fn resolve(
        &self,
        name: &str,
        argument: Option<&str>,
    ) -> Result<Arc<dyn PseudoClassPredicate>, SelectorError> {
        let factory = self
            .factories
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| SelectorError::UnknownPseudoClass {
                name: name.to_string(),
            })?;
        factory(argument)
    }

    /// Whether `name` has a registered factory.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_ascii_lowercase())
    }
}

/// The process-wide registry holding the built-ins. [`crate::Selector::compile`]
/// resolves against it; use [`crate::Selector::compile_in`] with an owned
/// registry to extend the set.
pub fn default_registry() -> &'static PseudoClassRegistry {
    static REGISTRY: Lazy<PseudoClassRegistry> = Lazy::new(PseudoClassRegistry::with_builtins);
    &REGISTRY
}

fn reject_argument(name: &str, argument: Option<&str>) -> Result<(), SelectorError> {
    match argument {
        None => Ok(()),
        Some(_) => Err(SelectorError::malformed(format!(
            "pseudo-class `:{name}` takes no argument"
        ))),
    }
}

fn flag(
    display_name: &'static str,
    attribute: &'static str,
    expect_present: bool,
    argument: Option<&str>,
) -> Result<Arc<dyn PseudoClassPredicate>, SelectorError> {
    reject_argument(display_name, argument)?;
    Ok(Arc::new(FlagPseudoClass {
        display_name,
        attribute,
        expect_present,
    }))
}

/// Pseudo-classes whose truth is the presence (or absence) of one boolean
/// attribute: `:checked`, `:disabled`/`:enabled`, `:required`/`:optional`,
/// `:read-only`/`:read-write`.
#[derive(Debug)]
struct FlagPseudoClass {
    display_name: &'static str,
    attribute: &'static str,
    expect_present: bool,
}

impl PseudoClassPredicate for FlagPseudoClass {
    fn evaluate(&self, element: &Element) -> bool {
        element.attribute(self.attribute).is_some() == self.expect_present
    }

    fn canonical(&self) -> String {
        format!(":{}", self.display_name)
    }
}

fn link_factory(
    argument: Option<&str>,
) -> Result<Arc<dyn PseudoClassPredicate>, SelectorError> {
    reject_argument("link", argument)?;
    Ok(Arc::new(LinkPseudoClass))
}

/// `:link` — an anchor carrying an `href`.
#[derive(Debug)]
struct LinkPseudoClass;

impl PseudoClassPredicate for LinkPseudoClass {
    fn evaluate(&self, element: &Element) -> bool {
        element.tag_name().eq_ignore_ascii_case("a") && element.attribute("href").is_some()
    }

    fn canonical(&self) -> String {
        ":link".to_string()
    }
}

fn lang_factory(
    argument: Option<&str>,
) -> Result<Arc<dyn PseudoClassPredicate>, SelectorError> {
    match argument {
        Some(tag) if !tag.trim().is_empty() => Ok(Arc::new(LangPseudoClass {
            tag: tag.trim().to_string(),
        })),
        _ => Err(SelectorError::invalid(
            "pseudo-class `:lang` requires a non-empty language tag",
        )),
    }
}

/// `:lang(tag)` — hyphen-segment match on the `lang` attribute, case-insensitive.
#[derive(Debug)]
struct LangPseudoClass {
    tag: String,
}

impl PseudoClassPredicate for LangPseudoClass {
    fn evaluate(&self, element: &Element) -> bool {
        let Some(value) = element.attribute_value("lang") else {
            return false;
        };
        if value.eq_ignore_ascii_case(&self.tag) {
            return true;
        }
        value
            .get(..self.tag.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(&self.tag))
            && value[self.tag.len()..].starts_with('-')
    }

    fn canonical(&self) -> String {
        format!(":lang({})", self.tag)
    }
}
