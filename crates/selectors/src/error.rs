//! Compile-time selector failures.

use thiserror::Error;

/// Everything that can go wrong while compiling a selector string.
///
/// All variants surface synchronously from [`compile`](crate::Selector::compile);
/// matching a compiled selector never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The expression does not match the selector grammar.
    #[error("malformed selector: {detail}")]
    MalformedSelector { detail: String },

    /// A pseudo-class name is not present in the registry.
    #[error("unknown pseudo-class `:{name}`")]
    UnknownPseudoClass { name: String },

    /// An empty or missing required argument at a public entry point.
    #[error("invalid argument: {detail}")]
    InvalidArgument { detail: String },
}

impl SelectorError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedSelector {
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidArgument {
            detail: detail.into(),
        }
    }
}
