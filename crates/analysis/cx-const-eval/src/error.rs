//! Constant evaluation errors

use crate::ValueKind;
use cx_scope::{LookupError, Severity, SymbolKind};
use cx_span::FileSpan;
use cx_syntax::NodeKind;
use thiserror::Error;

/// Errors that can occur while folding a constant expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstError {
    /// Name lookup found nothing
    #[error("unknown symbol '{name}' in constant expression")]
    UnknownSymbol {
        /// Id-expression as written
        name: String,
        /// Location of the id-expression
        span: FileSpan,
    },

    /// The name does not denote an enumerator or variable
    #[error("'{name}' is a {kind}, not an expression")]
    NotAnExpression {
        /// Id-expression as written
        name: String,
        /// Kind of the entity found
        kind: SymbolKind,
        /// Location of the id-expression
        span: FileSpan,
    },

    /// The name has no known constant value
    #[error("'{name}' does not have a constant value")]
    NoValue {
        /// Id-expression as written
        name: String,
        /// Location of the id-expression
        span: FileSpan,
    },

    /// The constant's value depends on itself
    #[error("the value of '{name}' depends on itself")]
    CyclicConstant {
        /// Id-expression as written
        name: String,
        /// Location of the id-expression
        span: FileSpan,
    },

    /// Division or modulo by zero
    #[error("division by zero in constant expression")]
    DivisionByZero {
        /// Location of the division operation
        span: FileSpan,
    },

    /// `L'x'`
    #[error("unsupported wide character {literal} in constant expression")]
    UnsupportedWideCharacter {
        /// Literal as written
        literal: String,
        /// Location of the literal
        span: FileSpan,
    },

    /// `'\n'` and friends
    #[error("unsupported escape sequence {literal} in constant expression")]
    UnsupportedEscapeSequence {
        /// Literal as written
        literal: String,
        /// Location of the literal
        span: FileSpan,
    },

    /// Floating point constants are not folded
    #[error("unsupported floating literal {literal} in constant expression")]
    UnsupportedFloatingLiteral {
        /// Literal as written
        literal: String,
        /// Location of the literal
        span: FileSpan,
    },

    /// Node outside the constant-expression grammar
    #[error("unsupported node '{kind}' when evaluating constant expression")]
    UnsupportedNode {
        /// Kind of the node
        kind: NodeKind,
        /// Location of the node
        span: FileSpan,
    },

    /// Operands still differ in kind after the usual arithmetic conversions
    #[error("both operands should have the same kind ({lhs} != {rhs})")]
    KindMismatch {
        /// Left operand kind
        lhs: ValueKind,
        /// Right operand kind
        rhs: ValueKind,
        /// Location of the operation
        span: FileSpan,
    },

    /// `increment` on a value that cannot be incremented
    #[error("a {kind} value cannot be incremented")]
    InvalidIncrement {
        /// Kind of the value
        kind: ValueKind,
    },

    /// Literal text that does not spell a value of its kind
    #[error("malformed literal '{literal}'")]
    MalformedLiteral {
        /// Literal as written
        literal: String,
        /// Location of the literal
        span: FileSpan,
    },

    /// A node is missing a child its kind requires
    #[error("malformed {kind} node")]
    MalformedTree {
        /// Kind of the node
        kind: NodeKind,
        /// Location of the node
        span: FileSpan,
    },

    /// Name lookup rejected the id-expression
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl ConstError {
    /// Returns the span where the error occurred, if it has one
    #[must_use]
    pub fn span(&self) -> Option<FileSpan> {
        match self {
            Self::UnknownSymbol { span, .. }
            | Self::NotAnExpression { span, .. }
            | Self::NoValue { span, .. }
            | Self::CyclicConstant { span, .. }
            | Self::DivisionByZero { span }
            | Self::UnsupportedWideCharacter { span, .. }
            | Self::UnsupportedEscapeSequence { span, .. }
            | Self::UnsupportedFloatingLiteral { span, .. }
            | Self::UnsupportedNode { span, .. }
            | Self::KindMismatch { span, .. }
            | Self::MalformedLiteral { span, .. }
            | Self::MalformedTree { span, .. } => Some(*span),
            Self::InvalidIncrement { .. } | Self::Lookup(_) => None,
        }
    }

    /// Whether the error is ill-formed user code or a broken invariant
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnknownSymbol { .. }
            | Self::NotAnExpression { .. }
            | Self::NoValue { .. }
            | Self::CyclicConstant { .. }
            | Self::DivisionByZero { .. } => Severity::Diagnosed,
            Self::UnsupportedWideCharacter { .. }
            | Self::UnsupportedEscapeSequence { .. }
            | Self::UnsupportedFloatingLiteral { .. }
            | Self::UnsupportedNode { .. }
            | Self::KindMismatch { .. }
            | Self::InvalidIncrement { .. }
            | Self::MalformedLiteral { .. }
            | Self::MalformedTree { .. } => Severity::Fatal,
            Self::Lookup(error) => error.severity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn test_messages_name_the_offending_construct() {
        let span = FileSpan::default();
        let errors = [
            ConstError::UnknownSymbol {
                name: "N".to_owned(),
                span,
            },
            ConstError::NotAnExpression {
                name: "f".to_owned(),
                kind: SymbolKind::Function,
                span,
            },
            ConstError::UnsupportedNode {
                kind: NodeKind::FunctionCall,
                span,
            },
            ConstError::KindMismatch {
                lhs: ValueKind::SignedInt,
                rhs: ValueKind::UnsignedLong,
                span,
            },
            ConstError::Lookup(LookupError::NotAScope {
                name: "v".to_owned(),
            }),
        ];
        let rendered: Vec<String> = errors
            .iter()
            .map(|error| format!("{}: {error}", error.severity()))
            .collect();

        expect![[r#"
            error: unknown symbol 'N' in constant expression
            error: 'f' is a function, not an expression
            internal error: unsupported node 'function-call' when evaluating constant expression
            internal error: both operands should have the same kind (signed int != unsigned long)
            error: 'v' is not a class or namespace"#]]
        .assert_eq(&rendered.join("\n"));
    }
}
