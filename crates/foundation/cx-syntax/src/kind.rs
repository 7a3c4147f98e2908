//! Node kinds of the C++ syntax tree

use std::fmt;

/// Kind of a syntax tree node
///
/// Child layout per kind:
/// - binary operators: `[lhs, rhs]`
/// - unary operators, `ConstantExpression`, `ParenthesizedExpression`: `[operand]`
/// - `CastExpression`: `[type_id, operand]`
/// - `ConditionalExpression`: `[condition, if_true, if_false]`
/// - `QualifiedId`: name components, optionally led by `GlobalScope`
/// - `FunctionCall`: `[callee, arguments...]`
/// - `TemplateId`: `[template_name, arguments...]`
/// - `MemberDeclaration`: `[type_specifier, declarator]`
/// - `FunctionDefinition`: `[type_specifier, declarator, body]`
/// - literals, `Symbol`, `TypeId`, `SimpleTypeSpecifier`, `Declarator`,
///   `BaseSpecifier`: leaves carrying their lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Top-level wrapper around a constant expression
    ConstantExpression,
    /// `( expr )`
    ParenthesizedExpression,
    /// Unqualified identifier
    Symbol,
    /// `a::b::c`
    QualifiedId,
    /// Leading `::` of a qualified id
    GlobalScope,
    /// `name<args>`
    TemplateId,
    /// `||`
    LogicalOr,
    /// `&&`
    LogicalAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `&`
    BitwiseAnd,
    /// `!=`
    DifferentOp,
    /// `==`
    EqualOp,
    /// `<`
    LowerThan,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterOrEqualThan,
    /// `<=`
    LowerOrEqualThan,
    /// `<<`
    ShlOp,
    /// `>>`
    ShrOp,
    /// Binary `+`
    AddOp,
    /// Binary `-`
    MinusOp,
    /// `*`
    MultOp,
    /// `%`
    ModOp,
    /// `/`
    DivOp,
    /// `(type) expr`
    CastExpression,
    /// `cond ? a : b`
    ConditionalExpression,
    /// `f(args)`
    FunctionCall,
    /// Decimal integer literal, including suffixes
    DecimalLiteral,
    /// Octal integer literal, including suffixes
    OctalLiteral,
    /// Hexadecimal integer literal, including suffixes
    HexadecimalLiteral,
    /// Quoted character literal, optionally prefixed with `L`
    CharacterLiteral,
    /// `true` or `false`
    BooleanLiteral,
    /// Floating point literal
    FloatingLiteral,
    /// String literal
    StringLiteral,
    /// Unary `+`
    PlusOp,
    /// `!`
    NotOp,
    /// Unary `-`
    NegOp,
    /// `~`
    ComplementOp,
    /// Type named in a cast
    TypeId,
    /// Type specifier of a declaration
    SimpleTypeSpecifier,
    /// Declarator of a declaration
    Declarator,
    /// Body of a class
    MemberSpecification,
    /// One member declaration inside a class body
    MemberDeclaration,
    /// `: base, base`
    BaseClause,
    /// One base class in a base clause
    BaseSpecifier,
    /// Function definition with its body
    FunctionDefinition,
    /// `{ statements }`
    CompoundStatement,
    /// `return expr;`
    ReturnStatement,
    /// `expr;`
    ExpressionStatement,
}

impl NodeKind {
    /// Whether the kind is a binary operator of the constant-expression grammar
    #[must_use]
    pub const fn is_binary_operator(self) -> bool {
        matches!(
            self,
            Self::LogicalOr
                | Self::LogicalAnd
                | Self::BitwiseOr
                | Self::BitwiseXor
                | Self::BitwiseAnd
                | Self::DifferentOp
                | Self::EqualOp
                | Self::LowerThan
                | Self::GreaterThan
                | Self::GreaterOrEqualThan
                | Self::LowerOrEqualThan
                | Self::ShlOp
                | Self::ShrOp
                | Self::AddOp
                | Self::MinusOp
                | Self::MultOp
                | Self::ModOp
                | Self::DivOp
        )
    }

    /// Whether the kind is a unary operator
    #[must_use]
    pub const fn is_unary_operator(self) -> bool {
        matches!(
            self,
            Self::PlusOp | Self::NotOp | Self::NegOp | Self::ComplementOp
        )
    }

    /// Whether the kind is a literal
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::DecimalLiteral
                | Self::OctalLiteral
                | Self::HexadecimalLiteral
                | Self::CharacterLiteral
                | Self::BooleanLiteral
                | Self::FloatingLiteral
                | Self::StringLiteral
        )
    }

    /// Source spelling of an operator kind
    #[must_use]
    pub const fn operator_text(self) -> Option<&'static str> {
        Some(match self {
            Self::LogicalOr => "||",
            Self::LogicalAnd => "&&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::BitwiseAnd => "&",
            Self::DifferentOp => "!=",
            Self::EqualOp => "==",
            Self::LowerThan => "<",
            Self::GreaterThan => ">",
            Self::GreaterOrEqualThan => ">=",
            Self::LowerOrEqualThan => "<=",
            Self::ShlOp => "<<",
            Self::ShrOp => ">>",
            Self::AddOp | Self::PlusOp => "+",
            Self::MinusOp | Self::NegOp => "-",
            Self::MultOp => "*",
            Self::ModOp => "%",
            Self::DivOp => "/",
            Self::NotOp => "!",
            Self::ComplementOp => "~",
            _ => return None,
        })
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConstantExpression => "constant-expression",
            Self::ParenthesizedExpression => "parenthesized-expression",
            Self::Symbol => "symbol",
            Self::QualifiedId => "qualified-id",
            Self::GlobalScope => "global-scope",
            Self::TemplateId => "template-id",
            Self::LogicalOr => "logical-or",
            Self::LogicalAnd => "logical-and",
            Self::BitwiseOr => "bitwise-or",
            Self::BitwiseXor => "bitwise-xor",
            Self::BitwiseAnd => "bitwise-and",
            Self::DifferentOp => "different-op",
            Self::EqualOp => "equal-op",
            Self::LowerThan => "lower-than",
            Self::GreaterThan => "greater-than",
            Self::GreaterOrEqualThan => "greater-or-equal-than",
            Self::LowerOrEqualThan => "lower-or-equal-than",
            Self::ShlOp => "shl-op",
            Self::ShrOp => "shr-op",
            Self::AddOp => "add-op",
            Self::MinusOp => "minus-op",
            Self::MultOp => "mult-op",
            Self::ModOp => "mod-op",
            Self::DivOp => "div-op",
            Self::CastExpression => "cast-expression",
            Self::ConditionalExpression => "conditional-expression",
            Self::FunctionCall => "function-call",
            Self::DecimalLiteral => "decimal-literal",
            Self::OctalLiteral => "octal-literal",
            Self::HexadecimalLiteral => "hexadecimal-literal",
            Self::CharacterLiteral => "character-literal",
            Self::BooleanLiteral => "boolean-literal",
            Self::FloatingLiteral => "floating-literal",
            Self::StringLiteral => "string-literal",
            Self::PlusOp => "plus-op",
            Self::NotOp => "not-op",
            Self::NegOp => "neg-op",
            Self::ComplementOp => "complement-op",
            Self::TypeId => "type-id",
            Self::SimpleTypeSpecifier => "simple-type-specifier",
            Self::Declarator => "declarator",
            Self::MemberSpecification => "member-specification",
            Self::MemberDeclaration => "member-declaration",
            Self::BaseClause => "base-clause",
            Self::BaseSpecifier => "base-specifier",
            Self::FunctionDefinition => "function-definition",
            Self::CompoundStatement => "compound-statement",
            Self::ReturnStatement => "return-statement",
            Self::ExpressionStatement => "expression-statement",
        };
        formatter.write_str(name)
    }
}
