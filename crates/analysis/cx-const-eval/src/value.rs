//! Constant value representation and the usual arithmetic conversions

use crate::ConstError;

/// A folded integral, character or boolean constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// `int`
    SignedInt(i32),
    /// `unsigned int`
    UnsignedInt(u32),
    /// `long`
    SignedLong(i64),
    /// `unsigned long`
    UnsignedLong(u64),
    /// `char`
    Character(i8),
    /// `bool`
    Bool(bool),
}

/// Kind tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValueKind {
    /// `int`
    #[display("signed int")]
    SignedInt,
    /// `unsigned int`
    #[display("unsigned int")]
    UnsignedInt,
    /// `long`
    #[display("signed long")]
    SignedLong,
    /// `unsigned long`
    #[display("unsigned long")]
    UnsignedLong,
    /// `char`
    #[display("character")]
    Character,
    /// `bool`
    #[display("bool")]
    Bool,
}

impl Value {
    /// `signed int` zero
    #[must_use]
    pub const fn zero() -> Self {
        Self::SignedInt(0)
    }

    /// `signed int` minus one
    #[must_use]
    pub const fn minus_one() -> Self {
        Self::SignedInt(-1)
    }

    /// Kind tag of the value
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::SignedInt(_) => ValueKind::SignedInt,
            Self::UnsignedInt(_) => ValueKind::UnsignedInt,
            Self::SignedLong(_) => ValueKind::SignedLong,
            Self::UnsignedLong(_) => ValueKind::UnsignedLong,
            Self::Character(_) => ValueKind::Character,
            Self::Bool(_) => ValueKind::Bool,
        }
    }

    /// Whether the value is zero (or `false`)
    #[must_use]
    pub const fn is_zero(self) -> bool {
        match self {
            Self::SignedInt(value) => value == 0,
            Self::UnsignedInt(value) => value == 0,
            Self::SignedLong(value) => value == 0,
            Self::UnsignedLong(value) => value == 0,
            Self::Character(value) => value == 0,
            Self::Bool(value) => !value,
        }
    }

    /// Adds one, keeping the kind
    ///
    /// # Errors
    ///
    /// Returns `ConstError::InvalidIncrement` for `bool`.
    pub fn increment(self) -> Result<Self, ConstError> {
        Ok(match self {
            Self::SignedInt(value) => Self::SignedInt(value.wrapping_add(1)),
            Self::UnsignedInt(value) => Self::UnsignedInt(value.wrapping_add(1)),
            Self::SignedLong(value) => Self::SignedLong(value.wrapping_add(1)),
            Self::UnsignedLong(value) => Self::UnsignedLong(value.wrapping_add(1)),
            Self::Character(value) => Self::Character(value.wrapping_add(1)),
            Self::Bool(_) => {
                return Err(ConstError::InvalidIncrement {
                    kind: ValueKind::Bool,
                });
            }
        })
    }

    /// `!v`, keeping the kind
    #[must_use]
    pub fn logical_not(self) -> Self {
        match self {
            Self::SignedInt(value) => Self::SignedInt(i32::from(value == 0)),
            Self::UnsignedInt(value) => Self::UnsignedInt(u32::from(value == 0)),
            Self::SignedLong(value) => Self::SignedLong(i64::from(value == 0)),
            Self::UnsignedLong(value) => Self::UnsignedLong(u64::from(value == 0)),
            Self::Character(value) => Self::Character(i8::from(value == 0)),
            Self::Bool(value) => Self::Bool(!value),
        }
    }

    /// `-v`, keeping the kind
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::SignedInt(value) => Self::SignedInt(value.wrapping_neg()),
            Self::UnsignedInt(value) => Self::UnsignedInt(value.wrapping_neg()),
            Self::SignedLong(value) => Self::SignedLong(value.wrapping_neg()),
            Self::UnsignedLong(value) => Self::UnsignedLong(value.wrapping_neg()),
            Self::Character(value) => Self::Character(value.wrapping_neg()),
            // -1 is still non-zero
            Self::Bool(value) => Self::Bool(value),
        }
    }

    /// `~v`, keeping the kind
    #[must_use]
    pub fn complement(self) -> Self {
        match self {
            Self::SignedInt(value) => Self::SignedInt(!value),
            Self::UnsignedInt(value) => Self::UnsignedInt(!value),
            Self::SignedLong(value) => Self::SignedLong(!value),
            Self::UnsignedLong(value) => Self::UnsignedLong(!value),
            Self::Character(value) => Self::Character(!value),
            // every bit pattern of ~0 and ~1 is non-zero
            Self::Bool(_) => Self::Bool(true),
        }
    }

    /// Integral promotion: `char` and `bool` become `signed int`
    #[must_use]
    pub fn integral_promotion(self) -> Self {
        match self {
            Self::Character(value) => Self::SignedInt(i32::from(value)),
            Self::Bool(value) => Self::SignedInt(i32::from(value)),
            other => other,
        }
    }

    /// Bit-reinterpreting conversion to `unsigned long`
    #[must_use]
    pub const fn to_unsigned_long(self) -> Self {
        Self::UnsignedLong(match self {
            Self::SignedInt(value) => value as u64,
            Self::UnsignedInt(value) => value as u64,
            Self::SignedLong(value) => value as u64,
            Self::UnsignedLong(value) => value,
            Self::Character(value) => value as u64,
            Self::Bool(value) => value as u64,
        })
    }

    /// Bit-reinterpreting conversion to `signed long`
    #[must_use]
    pub const fn to_signed_long(self) -> Self {
        Self::SignedLong(match self {
            Self::SignedInt(value) => value as i64,
            Self::UnsignedInt(value) => value as i64,
            Self::SignedLong(value) => value,
            Self::UnsignedLong(value) => value as i64,
            Self::Character(value) => value as i64,
            Self::Bool(value) => value as i64,
        })
    }

    /// Bit-reinterpreting conversion to `unsigned int`
    #[must_use]
    pub const fn to_unsigned_int(self) -> Self {
        Self::UnsignedInt(match self {
            Self::SignedInt(value) => value as u32,
            Self::UnsignedInt(value) => value,
            Self::SignedLong(value) => value as u32,
            Self::UnsignedLong(value) => value as u32,
            Self::Character(value) => value as u32,
            Self::Bool(value) => value as u32,
        })
    }
}

/// Applies the usual arithmetic conversions to an operand pair
///
/// Every step works on the output of the previous one. Conversions
/// reinterpret bits, so `-1` becomes `ULONG_MAX` when it meets an
/// `unsigned long`. `signed long` is assumed to hold every `unsigned int`.
#[must_use]
pub fn promote(lhs: Value, rhs: Value) -> (Value, Value) {
    use ValueKind::{SignedInt, SignedLong, UnsignedInt, UnsignedLong};

    if lhs.kind() == rhs.kind() {
        return (lhs, rhs);
    }

    let mut lhs = lhs.integral_promotion();
    let mut rhs = rhs.integral_promotion();

    if (lhs.kind() == UnsignedLong) != (rhs.kind() == UnsignedLong) {
        lhs = lhs.to_unsigned_long();
        rhs = rhs.to_unsigned_long();
    }

    match (lhs.kind(), rhs.kind()) {
        (SignedLong, UnsignedInt) => rhs = rhs.to_signed_long(),
        (UnsignedInt, SignedLong) => lhs = lhs.to_signed_long(),
        _ => {}
    }

    if (lhs.kind() == SignedLong) != (rhs.kind() == SignedLong) {
        lhs = lhs.to_signed_long();
        rhs = rhs.to_signed_long();
    }

    match (lhs.kind(), rhs.kind()) {
        (UnsignedLong, SignedLong) => rhs = rhs.to_unsigned_long(),
        (SignedLong, UnsignedLong) => lhs = lhs.to_unsigned_long(),
        (UnsignedInt, SignedInt) => rhs = rhs.to_unsigned_int(),
        (SignedInt, UnsignedInt) => lhs = lhs.to_unsigned_int(),
        _ => {}
    }

    (lhs, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wraps `raw` into `kind` the way a two's complement conversion does
    fn wrapped(kind: ValueKind, raw: i128) -> Value {
        match kind {
            ValueKind::SignedInt => Value::SignedInt(raw as i32),
            ValueKind::UnsignedInt => Value::UnsignedInt(raw as u32),
            ValueKind::SignedLong => Value::SignedLong(raw as i64),
            ValueKind::UnsignedLong => Value::UnsignedLong(raw as u64),
            other => panic!("{other} is not an arithmetic kind"),
        }
    }

    fn common_kind(lhs: ValueKind, rhs: ValueKind) -> ValueKind {
        use ValueKind::{SignedInt, SignedLong, UnsignedInt, UnsignedLong};

        match (lhs, rhs) {
            _ if lhs == rhs => lhs,
            (UnsignedLong, _) | (_, UnsignedLong) => UnsignedLong,
            (SignedLong, _) | (_, SignedLong) => SignedLong,
            (UnsignedInt, SignedInt) | (SignedInt, UnsignedInt) => UnsignedInt,
            _ => panic!("{lhs} and {rhs} are not arithmetic kinds"),
        }
    }

    #[test]
    fn test_promote_wraps_every_arithmetic_pair() {
        let samples = [
            (ValueKind::SignedInt, -1),
            (ValueKind::SignedInt, 7),
            (ValueKind::UnsignedInt, 5),
            (ValueKind::UnsignedInt, i128::from(u32::MAX)),
            (ValueKind::SignedLong, -1),
            (ValueKind::SignedLong, i128::from(i64::MIN)),
            (ValueKind::UnsignedLong, 5),
            (ValueKind::UnsignedLong, i128::from(u64::MAX)),
        ];
        for (lhs_kind, lhs_raw) in samples {
            for (rhs_kind, rhs_raw) in samples {
                let lhs = wrapped(lhs_kind, lhs_raw);
                let rhs = wrapped(rhs_kind, rhs_raw);
                let target = common_kind(lhs_kind, rhs_kind);
                assert_eq!(
                    promote(lhs, rhs),
                    (wrapped(target, lhs_raw), wrapped(target, rhs_raw)),
                    "{lhs:?} with {rhs:?}"
                );
            }
        }
    }

    #[test]
    fn test_promote_yields_common_kind_with_small_kinds() {
        let samples = [
            Value::SignedInt(-3),
            Value::UnsignedLong(9),
            Value::Character(b'a' as i8),
            Value::Bool(true),
        ];
        for lhs in samples {
            for rhs in samples {
                let (promoted_lhs, promoted_rhs) = promote(lhs, rhs);
                assert_eq!(promoted_lhs.kind(), promoted_rhs.kind(), "{lhs:?} with {rhs:?}");
            }
        }
    }

    #[test]
    fn test_promote_reinterprets_bits() {
        assert_eq!(
            promote(Value::SignedLong(-1), Value::UnsignedLong(5)),
            (Value::UnsignedLong(u64::MAX), Value::UnsignedLong(5))
        );
        assert_eq!(
            promote(Value::SignedInt(-1), Value::UnsignedInt(5)),
            (Value::UnsignedInt(u32::MAX), Value::UnsignedInt(5))
        );
        assert_eq!(
            promote(Value::UnsignedLong(5), Value::SignedInt(-1)),
            (Value::UnsignedLong(5), Value::UnsignedLong(u64::MAX))
        );
    }

    #[test]
    fn test_signed_long_absorbs_unsigned_int() {
        assert_eq!(
            promote(Value::SignedLong(-1), Value::UnsignedInt(5)),
            (Value::SignedLong(-1), Value::SignedLong(5))
        );
        assert_eq!(
            promote(Value::UnsignedInt(u32::MAX), Value::SignedLong(1)),
            (Value::SignedLong(i64::from(u32::MAX)), Value::SignedLong(1))
        );
        assert_eq!(
            promote(Value::SignedInt(-2), Value::SignedLong(3)),
            (Value::SignedLong(-2), Value::SignedLong(3))
        );
    }

    #[test]
    fn test_character_and_bool_promote_to_int() {
        assert_eq!(
            promote(Value::Character(-1), Value::Bool(true)),
            (Value::SignedInt(-1), Value::SignedInt(1))
        );
        assert_eq!(
            promote(Value::Character(2), Value::UnsignedInt(1)),
            (Value::UnsignedInt(2), Value::UnsignedInt(1))
        );
    }

    #[test]
    fn test_same_kind_is_untouched() {
        assert_eq!(
            promote(Value::Bool(true), Value::Bool(false)),
            (Value::Bool(true), Value::Bool(false))
        );
    }

    #[test]
    fn test_increment() {
        assert_eq!(Value::SignedInt(i32::MAX).increment(), Ok(Value::SignedInt(i32::MIN)));
        assert_eq!(Value::Character(b'a' as i8).increment(), Ok(Value::Character(b'b' as i8)));
        assert_eq!(
            Value::Bool(false).increment(),
            Err(ConstError::InvalidIncrement { kind: ValueKind::Bool })
        );
    }

    #[test]
    fn test_unary_operators_keep_kind() {
        assert_eq!(Value::UnsignedInt(0).logical_not(), Value::UnsignedInt(1));
        assert_eq!(Value::UnsignedInt(1).negate(), Value::UnsignedInt(u32::MAX));
        assert_eq!(Value::SignedLong(0).complement(), Value::SignedLong(-1));
        assert_eq!(Value::Bool(false).complement(), Value::Bool(true));
        assert!(Value::zero().is_zero());
        assert!(!Value::minus_one().is_zero());
    }
}
