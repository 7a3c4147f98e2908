//! Constant expression evaluation for C++
//!
//! Folds integral, character and boolean constant expressions following
//! the usual arithmetic conversions, and turns folded values back into
//! literal leaves so they can be injected as initializers.

mod error;
mod evaluator;
mod literal;
mod operator;
mod value;

pub use error::ConstError;
pub use evaluator::{ConstEvaluator, evaluate_constant_expression};
pub use literal::{parse_character_literal, parse_integer_literal, to_literal_tree, value_from_literal};
pub use operator::{BinaryOp, Strictness};
pub use value::{Value, ValueKind, promote};
