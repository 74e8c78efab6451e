//! Elements and their ordered attribute lists.

use smallvec::SmallVec;

/// A single name/value pair carried by an element.
///
/// The value is optional: boolean attributes like `checked` or `disabled`
/// exist without one. Name comparison is ASCII case-insensitive everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: Option<String>,
}

impl Attribute {
    /// A valued attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// A valueless (boolean) attribute.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Case-insensitive name test.
    #[inline]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub(crate) fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }
}

/// An element: a tag name plus an ordered attribute sequence.
///
/// Duplicate attribute names are permitted; name lookup returns the first
/// match in insertion order. Most elements carry a handful of attributes, so
/// the list lives inline.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: SmallVec<Attribute, 4>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: SmallVec::new(),
        }
    }

    /// Builder: append a valued attribute. For elements not yet inserted into
    /// a document; afterwards mutate through [`crate::Document`] so observers
    /// are notified.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(Attribute::new(name, value));
        self
    }

    /// Builder: append a valueless attribute.
    #[must_use]
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.attrs.push(Attribute::flag(name));
        self
    }

    #[inline]
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// First attribute with the given name, case-insensitive.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|attr| attr.is_named(name))
    }

    /// Value of the first attribute with the given name, if both exist.
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(Attribute::value)
    }

    /// All attributes in insertion order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attrs
    }

    pub(crate) fn position_of(&self, name: &str) -> Option<usize> {
        self.attrs.iter().position(|attr| attr.is_named(name))
    }

    pub(crate) fn attr_at_mut(&mut self, index: usize) -> &mut Attribute {
        &mut self.attrs[index]
    }

    pub(crate) fn attr_at(&self, index: usize) -> &Attribute {
        &self.attrs[index]
    }

    pub(crate) fn push_attr(&mut self, attribute: Attribute) {
        self.attrs.push(attribute);
    }

    pub(crate) fn remove_attr_at(&mut self, index: usize) -> Attribute {
        self.attrs.remove(index)
    }
}
