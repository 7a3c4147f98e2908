//! Binary operators of the constant-expression grammar

use crate::{ConstError, Value};
use cx_span::FileSpan;
use cx_syntax::NodeKind;
use std::ops::{BitAnd, BitOr, BitXor};

/// When the right operand of a binary operator is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Always
    Strict,
    /// Only when the left operand is non-zero (`&&`)
    IfLhsNonZero,
    /// Only when the left operand is zero (`||`)
    IfLhsZero,
}

impl Strictness {
    /// Whether the right operand must be evaluated given the left one
    #[must_use]
    pub fn evaluates_rhs(self, lhs: Value) -> bool {
        match self {
            Self::Strict => true,
            Self::IfLhsNonZero => !lhs.is_zero(),
            Self::IfLhsZero => lhs.is_zero(),
        }
    }
}

/// A binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BinaryOp {
    /// Logical or
    #[display("||")]
    LogicalOr,
    /// Logical and
    #[display("&&")]
    LogicalAnd,
    /// Bitwise or
    #[display("|")]
    BitOr,
    /// Bitwise exclusive or
    #[display("^")]
    BitXor,
    /// Bitwise and
    #[display("&")]
    BitAnd,
    /// Inequality
    #[display("!=")]
    NotEqual,
    /// Equality
    #[display("==")]
    Equal,
    /// Less than
    #[display("<")]
    Less,
    /// Greater than
    #[display(">")]
    Greater,
    /// Greater than or equal
    #[display(">=")]
    GreaterEqual,
    /// Less than or equal
    #[display("<=")]
    LessEqual,
    /// Left shift
    #[display("<<")]
    Shl,
    /// Right shift
    #[display(">>")]
    Shr,
    /// Addition
    #[display("+")]
    Add,
    /// Subtraction
    #[display("-")]
    Sub,
    /// Multiplication
    #[display("*")]
    Mul,
    /// Remainder
    #[display("%")]
    Rem,
    /// Division
    #[display("/")]
    Div,
}

impl BinaryOp {
    /// Operator of a binary node kind
    #[must_use]
    pub fn from_node_kind(kind: NodeKind) -> Option<Self> {
        Some(match kind {
            NodeKind::LogicalOr => Self::LogicalOr,
            NodeKind::LogicalAnd => Self::LogicalAnd,
            NodeKind::BitwiseOr => Self::BitOr,
            NodeKind::BitwiseXor => Self::BitXor,
            NodeKind::BitwiseAnd => Self::BitAnd,
            NodeKind::DifferentOp => Self::NotEqual,
            NodeKind::EqualOp => Self::Equal,
            NodeKind::LowerThan => Self::Less,
            NodeKind::GreaterThan => Self::Greater,
            NodeKind::GreaterOrEqualThan => Self::GreaterEqual,
            NodeKind::LowerOrEqualThan => Self::LessEqual,
            NodeKind::ShlOp => Self::Shl,
            NodeKind::ShrOp => Self::Shr,
            NodeKind::AddOp => Self::Add,
            NodeKind::MinusOp => Self::Sub,
            NodeKind::MultOp => Self::Mul,
            NodeKind::ModOp => Self::Rem,
            NodeKind::DivOp => Self::Div,
            _ => return None,
        })
    }

    /// Evaluation order of the right operand
    #[must_use]
    pub fn strictness(self) -> Strictness {
        match self {
            Self::LogicalAnd => Strictness::IfLhsNonZero,
            Self::LogicalOr => Strictness::IfLhsZero,
            _ => Strictness::Strict,
        }
    }

    /// Combines two operands of the same kind
    ///
    /// Logical and relational operators yield `bool`; every other operator
    /// keeps the operand kind and wraps on overflow.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` for `/` and `%` by zero, `KindMismatch` when the
    /// operands were not promoted to a common kind.
    pub fn apply(self, lhs: Value, rhs: Value, span: FileSpan) -> Result<Value, ConstError> {
        let folded = match (lhs, rhs) {
            (Value::SignedInt(a), Value::SignedInt(b)) => {
                self.fold(a, b, span)?.into_value(Value::SignedInt)
            }
            (Value::UnsignedInt(a), Value::UnsignedInt(b)) => {
                self.fold(a, b, span)?.into_value(Value::UnsignedInt)
            }
            (Value::SignedLong(a), Value::SignedLong(b)) => {
                self.fold(a, b, span)?.into_value(Value::SignedLong)
            }
            (Value::UnsignedLong(a), Value::UnsignedLong(b)) => {
                self.fold(a, b, span)?.into_value(Value::UnsignedLong)
            }
            (Value::Character(a), Value::Character(b)) => {
                self.fold(a, b, span)?.into_value(Value::Character)
            }
            (Value::Bool(a), Value::Bool(b)) => self
                .fold(u8::from(a), u8::from(b), span)?
                .into_value(|bits| Value::Bool(bits != 0)),
            _ => {
                return Err(ConstError::KindMismatch {
                    lhs: lhs.kind(),
                    rhs: rhs.kind(),
                    span,
                });
            }
        };
        Ok(folded)
    }

    fn fold<T: Integral>(self, a: T, b: T, span: FileSpan) -> Result<Folded<T>, ConstError> {
        Ok(match self {
            Self::LogicalOr => Folded::Truth(a != T::ZERO || b != T::ZERO),
            Self::LogicalAnd => Folded::Truth(a != T::ZERO && b != T::ZERO),
            Self::BitOr => Folded::Same(a | b),
            Self::BitXor => Folded::Same(a ^ b),
            Self::BitAnd => Folded::Same(a & b),
            Self::NotEqual => Folded::Truth(a != b),
            Self::Equal => Folded::Truth(a == b),
            Self::Less => Folded::Truth(a < b),
            Self::Greater => Folded::Truth(a > b),
            Self::GreaterEqual => Folded::Truth(a >= b),
            Self::LessEqual => Folded::Truth(a <= b),
            Self::Shl => Folded::Same(a.shl(b.shift_count())),
            Self::Shr => Folded::Same(a.shr(b.shift_count())),
            Self::Add => Folded::Same(a.add(b)),
            Self::Sub => Folded::Same(a.sub(b)),
            Self::Mul => Folded::Same(a.mul(b)),
            Self::Rem | Self::Div if b == T::ZERO => {
                return Err(ConstError::DivisionByZero { span });
            }
            Self::Rem => Folded::Same(a.rem(b)),
            Self::Div => Folded::Same(a.div(b)),
        })
    }
}

enum Folded<T> {
    Same(T),
    Truth(bool),
}

impl<T> Folded<T> {
    fn into_value(self, wrap: impl FnOnce(T) -> Value) -> Value {
        match self {
            Self::Same(value) => wrap(value),
            Self::Truth(truth) => Value::Bool(truth),
        }
    }
}

/// Native integer with C's wrapping arithmetic
trait Integral:
    Copy + Ord + BitAnd<Output = Self> + BitOr<Output = Self> + BitXor<Output = Self>
{
    const ZERO: Self;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn div(self, rhs: Self) -> Self;
    fn rem(self, rhs: Self) -> Self;
    fn shl(self, count: u32) -> Self;
    fn shr(self, count: u32) -> Self;
    fn shift_count(self) -> u32;
}

macro_rules! impl_integral {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Integral for $ty {
                const ZERO: Self = 0;

                fn add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                fn sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                fn mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }

                fn div(self, rhs: Self) -> Self {
                    self.wrapping_div(rhs)
                }

                fn rem(self, rhs: Self) -> Self {
                    self.wrapping_rem(rhs)
                }

                fn shl(self, count: u32) -> Self {
                    self.wrapping_shl(count)
                }

                fn shr(self, count: u32) -> Self {
                    self.wrapping_shr(count)
                }

                fn shift_count(self) -> u32 {
                    self as u32
                }
            }
        )*
    };
}

impl_integral!(i8, u8, i32, u32, i64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, ConstError> {
        op.apply(lhs, rhs, FileSpan::default())
    }

    #[test]
    fn test_operator_spelling_matches_node_kind() {
        let kinds = [
            NodeKind::LogicalOr,
            NodeKind::LogicalAnd,
            NodeKind::BitwiseOr,
            NodeKind::BitwiseXor,
            NodeKind::BitwiseAnd,
            NodeKind::DifferentOp,
            NodeKind::EqualOp,
            NodeKind::LowerThan,
            NodeKind::GreaterThan,
            NodeKind::GreaterOrEqualThan,
            NodeKind::LowerOrEqualThan,
            NodeKind::ShlOp,
            NodeKind::ShrOp,
            NodeKind::AddOp,
            NodeKind::MinusOp,
            NodeKind::MultOp,
            NodeKind::ModOp,
            NodeKind::DivOp,
        ];
        for kind in kinds {
            let op = BinaryOp::from_node_kind(kind).map(|op| op.to_string());
            assert_eq!(op.as_deref(), kind.operator_text(), "{kind}");
        }
        assert_eq!(BinaryOp::from_node_kind(NodeKind::NotOp), None);
    }

    #[test]
    fn test_arithmetic_wraps() {
        assert_eq!(
            apply(BinaryOp::Add, Value::SignedInt(i32::MAX), Value::SignedInt(1)),
            Ok(Value::SignedInt(i32::MIN))
        );
        assert_eq!(
            apply(BinaryOp::Sub, Value::UnsignedInt(0), Value::UnsignedInt(1)),
            Ok(Value::UnsignedInt(u32::MAX))
        );
        assert_eq!(
            apply(BinaryOp::Div, Value::SignedInt(i32::MIN), Value::SignedInt(-1)),
            Ok(Value::SignedInt(i32::MIN))
        );
    }

    #[test]
    fn test_division_by_zero_is_diagnosed() {
        for op in [BinaryOp::Div, BinaryOp::Rem] {
            assert_eq!(
                apply(op, Value::SignedLong(1), Value::SignedLong(0)),
                Err(ConstError::DivisionByZero { span: FileSpan::default() })
            );
        }
    }

    #[test]
    fn test_relational_and_logical_yield_bool() {
        assert_eq!(
            apply(BinaryOp::Less, Value::UnsignedInt(1), Value::UnsignedInt(2)),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            apply(BinaryOp::LogicalAnd, Value::SignedInt(3), Value::SignedInt(0)),
            Ok(Value::Bool(false))
        );
        assert_eq!(
            apply(BinaryOp::LogicalOr, Value::Character(0), Value::Character(1)),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn test_bool_operands_stay_bool() {
        assert_eq!(
            apply(BinaryOp::Add, Value::Bool(true), Value::Bool(true)),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            apply(BinaryOp::Sub, Value::Bool(true), Value::Bool(true)),
            Ok(Value::Bool(false))
        );
    }

    #[test]
    fn test_shift_count_wraps_at_width() {
        assert_eq!(
            apply(BinaryOp::Shl, Value::UnsignedLong(2), Value::UnsignedLong(3)),
            Ok(Value::UnsignedLong(16))
        );
        assert_eq!(
            apply(BinaryOp::Shl, Value::SignedInt(1), Value::SignedInt(33)),
            Ok(Value::SignedInt(2))
        );
        assert_eq!(
            apply(BinaryOp::Shr, Value::SignedInt(-8), Value::SignedInt(1)),
            Ok(Value::SignedInt(-4))
        );
    }

    #[test]
    fn test_mixed_kinds_are_rejected() {
        let error = apply(BinaryOp::Add, Value::SignedInt(1), Value::SignedLong(1));
        assert!(matches!(error, Err(ConstError::KindMismatch { .. })));
    }

    #[test]
    fn test_short_circuit_conditions() {
        assert!(!BinaryOp::LogicalAnd.strictness().evaluates_rhs(Value::zero()));
        assert!(BinaryOp::LogicalAnd.strictness().evaluates_rhs(Value::SignedInt(2)));
        assert!(!BinaryOp::LogicalOr.strictness().evaluates_rhs(Value::Bool(true)));
        assert!(BinaryOp::LogicalOr.strictness().evaluates_rhs(Value::Bool(false)));
        assert!(BinaryOp::Add.strictness().evaluates_rhs(Value::zero()));
    }
}
