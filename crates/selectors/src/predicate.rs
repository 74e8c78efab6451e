//! Attribute predicates: one `[name op value]` condition each.

use core::fmt;
use markup::Element;

/// The value relation of an attribute predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeMatcher {
    /// `[attr=value]` — exact match.
    Equals(String),
    /// `[attr~=value]` — whitespace-separated token membership.
    Includes(String),
    /// `[attr|=value]` — exact match or `value-` prefix.
    DashMatch(String),
    /// `[attr^=value]` — starts with.
    Prefix(String),
    /// `[attr$=value]` — ends with.
    Suffix(String),
    /// `[attr*=value]` — contains substring.
    Substring(String),
}

impl AttributeMatcher {
    /// Whether the relation holds for a present attribute value.
    /// Values compare case-sensitively.
    fn holds(&self, value: &str) -> bool {
        match self {
            Self::Equals(expected) => value == expected,
            Self::Includes(token) => value.split_whitespace().any(|candidate| candidate == token),
            Self::DashMatch(segment) => {
                value == segment
                    || value
                        .strip_prefix(segment.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            Self::Prefix(prefix) => value.starts_with(prefix),
            Self::Suffix(suffix) => value.ends_with(suffix),
            Self::Substring(needle) => value.contains(needle),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Equals(_) => "=",
            Self::Includes(_) => "~=",
            Self::DashMatch(_) => "|=",
            Self::Prefix(_) => "^=",
            Self::Suffix(_) => "$=",
            Self::Substring(_) => "*=",
        }
    }

    fn operand(&self) -> &str {
        match self {
            Self::Equals(operand)
            | Self::Includes(operand)
            | Self::DashMatch(operand)
            | Self::Prefix(operand)
            | Self::Suffix(operand)
            | Self::Substring(operand) => operand,
        }
    }
}

/// One compiled `[…]` condition. Bare `[name]` is a presence test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePredicate {
    /// Attribute name, stored lowercase; lookup is case-insensitive anyway.
    name: String,
    matcher: Option<AttributeMatcher>,
}

impl AttributePredicate {
    pub fn new(name: impl Into<String>, matcher: AttributeMatcher) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            matcher: Some(matcher),
        }
    }

    /// Presence-only predicate (`[name]`).
    pub fn presence(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            matcher: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn matcher(&self) -> Option<&AttributeMatcher> {
        self.matcher.as_ref()
    }

    /// Evaluate against an element.
    ///
    /// A missing attribute always fails. A present but valueless attribute
    /// passes only the bare presence test: no value relation is vacuously
    /// true.
    pub fn evaluate(&self, element: &Element) -> bool {
        let Some(attribute) = element.attribute(&self.name) else {
            return false;
        };
        match (&self.matcher, attribute.value()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(matcher), Some(value)) => matcher.holds(value),
        }
    }

    /// The class token this predicate pins, when it is a token-membership
    /// test on `class`. Index-accelerated queries seed candidates from it.
    pub fn class_token(&self) -> Option<&str> {
        match &self.matcher {
            Some(AttributeMatcher::Includes(token)) if self.name == "class" => Some(token),
            _ => None,
        }
    }
}

fn is_bare_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}

impl fmt::Display for AttributePredicate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.matcher {
            None => write!(formatter, "[{}]", self.name),
            Some(matcher) => {
                let operand = matcher.operand();
                if is_bare_token(operand) {
                    write!(formatter, "[{}{}{}]", self.name, matcher.symbol(), operand)
                } else if operand.contains('"') {
                    write!(formatter, "[{}{}'{}']", self.name, matcher.symbol(), operand)
                } else {
                    write!(formatter, "[{}{}\"{}\"]", self.name, matcher.symbol(), operand)
                }
            }
        }
    }
}
