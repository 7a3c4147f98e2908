//! Literal parsing and reification of folded values

use crate::{ConstError, Value};
use cx_span::FileSpan;
use cx_syntax::{NodeId, NodeKind, SyntaxTree};

/// Builds the value a literal leaf spells
///
/// # Errors
///
/// Floating literals, wide and escaped character literals are not folded.
/// Text that does not spell a literal of the node's kind is
/// `MalformedLiteral`.
pub fn value_from_literal(tree: &SyntaxTree, node: NodeId) -> Result<Value, ConstError> {
    let kind = tree.kind(node);
    let span = tree.span(node);
    let text = tree.text(node).ok_or(ConstError::MalformedTree { kind, span })?;
    match kind {
        NodeKind::DecimalLiteral | NodeKind::OctalLiteral | NodeKind::HexadecimalLiteral => {
            parse_integer_literal(text, span)
        }
        NodeKind::BooleanLiteral => Ok(Value::Bool(text != "false")),
        NodeKind::CharacterLiteral => parse_character_literal(text, span),
        NodeKind::FloatingLiteral => Err(ConstError::UnsupportedFloatingLiteral {
            literal: text.to_owned(),
            span,
        }),
        _ => Err(ConstError::UnsupportedNode { kind, span }),
    }
}

/// Parses an integer literal such as `10UL`, `010` or `0x10`
///
/// Up to three trailing `U`/`L` characters select the kind; the base comes
/// from the prefix. A leading `-` (produced by reification of negative
/// values) negates with wraparound. Payloads too large for 64 bits
/// saturate before the conversion to the selected kind.
///
/// # Errors
///
/// `MalformedLiteral` when no digits remain or a digit is invalid for the
/// base.
pub fn parse_integer_literal(text: &str, span: FileSpan) -> Result<Value, ConstError> {
    let malformed = || ConstError::MalformedLiteral {
        literal: text.to_owned(),
        span,
    };

    let mut is_long = false;
    let mut is_unsigned = false;
    let mut body = text;
    for _ in 0..3 {
        match body.as_bytes().last().map(u8::to_ascii_uppercase) {
            Some(b'L') => is_long = true,
            Some(b'U') => is_unsigned = true,
            _ => break,
        }
        body = &body[..body.len() - 1];
    }

    let (negative, body) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let (radix, digits) = if let Some(hex) =
        body.strip_prefix("0x").or_else(|| body.strip_prefix("0X"))
    {
        (16, hex)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };
    if digits.is_empty() {
        return Err(malformed());
    }

    let mut magnitude: u64 = 0;
    for digit in digits.chars() {
        let digit = digit.to_digit(radix).ok_or_else(malformed)?;
        magnitude = magnitude
            .saturating_mul(u64::from(radix))
            .saturating_add(u64::from(digit));
    }
    let bits = if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    };

    Ok(match (is_long, is_unsigned) {
        (true, true) => Value::UnsignedLong(bits),
        (true, false) => Value::SignedLong(bits as i64),
        (false, true) => Value::UnsignedInt(bits as u32),
        (false, false) => Value::SignedInt(bits as i32),
    })
}

/// Parses a narrow, unescaped character literal such as `'a'`
///
/// Characters up to U+00FF map to their code point, so a byte survives
/// reification and parsing unchanged.
///
/// # Errors
///
/// `UnsupportedWideCharacter` for `L'a'`, `UnsupportedEscapeSequence` for
/// a backslash, `MalformedLiteral` for anything that is not one quoted
/// character.
pub fn parse_character_literal(text: &str, span: FileSpan) -> Result<Value, ConstError> {
    let malformed = || ConstError::MalformedLiteral {
        literal: text.to_owned(),
        span,
    };

    if text.starts_with(['L', 'l']) {
        return Err(ConstError::UnsupportedWideCharacter {
            literal: text.to_owned(),
            span,
        });
    }

    let quoted = text
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .ok_or_else(malformed)?;
    if quoted.starts_with('\\') {
        return Err(ConstError::UnsupportedEscapeSequence {
            literal: text.to_owned(),
            span,
        });
    }
    let mut chars = quoted.chars();
    let (Some(character), None) = (chars.next(), chars.next()) else {
        return Err(malformed());
    };

    let byte = u8::try_from(u32::from(character)).map_err(|_| malformed())?;
    Ok(Value::Character(byte as i8))
}

/// Allocates the literal leaf that spells `value`
///
/// Integers print in decimal with the suffix of their kind (`L`, `U`,
/// `LU`), so parsing the leaf yields `value` again. A backslash character
/// is printed as an octal escape, which only diagnostics can read back.
/// Other characters are written as the raw byte, control bytes included.
pub fn to_literal_tree(tree: &mut SyntaxTree, value: Value) -> NodeId {
    match value {
        Value::SignedInt(value) => tree.leaf(NodeKind::DecimalLiteral, format!("{value}")),
        Value::SignedLong(value) => tree.leaf(NodeKind::DecimalLiteral, format!("{value}L")),
        Value::UnsignedInt(value) => tree.leaf(NodeKind::DecimalLiteral, format!("{value}U")),
        Value::UnsignedLong(value) => tree.leaf(NodeKind::DecimalLiteral, format!("{value}LU")),
        Value::Character(value) => {
            let byte = value as u8;
            let text = if byte == b'\\' {
                format!("'\\{byte:03o}'")
            } else {
                format!("'{}'", char::from(byte))
            };
            tree.leaf(NodeKind::CharacterLiteral, text)
        }
        Value::Bool(value) => tree.leaf(
            NodeKind::BooleanLiteral,
            if value { "true" } else { "false" },
        ),
    }
}
