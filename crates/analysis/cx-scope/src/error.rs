//! Error types for name lookup

use cx_syntax::NodeKind;
use thiserror::Error;

/// How an error affects the current translation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Severity {
    /// Invariant violation: an upstream pass handed over something it
    /// should have rejected
    #[display("internal error")]
    Fatal,
    /// Ill-formed user code
    #[display("error")]
    Diagnosed,
}

/// Errors raised while resolving an id-expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The node cannot name an entity
    #[error("cannot look up a {kind} node as an id-expression")]
    NotAName {
        /// Kind of the offending node
        kind: NodeKind,
    },

    /// An identifier leaf without text
    #[error("identifier node has no text")]
    MissingText,

    /// A qualified-id component that names neither a class nor a namespace
    #[error("'{name}' is not a class or namespace")]
    NotAScope {
        /// Offending component
        name: String,
    },
}

impl LookupError {
    /// Severity of the error
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::NotAName { .. } | Self::MissingText => Severity::Fatal,
            Self::NotAScope { .. } => Severity::Diagnosed,
        }
    }
}
