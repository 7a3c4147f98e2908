//! Constant expression evaluator

use crate::literal::value_from_literal;
use crate::operator::BinaryOp;
use crate::{ConstError, Value, promote};
use cx_scope::{DeclContext, Program, SymbolId};
use cx_syntax::{NodeId, NodeKind, SyntaxTree};

/// Constant expression evaluator
///
/// Folds the constant-expression subgrammar of C++ (literals, names of
/// enumerators and constant variables, unary, binary and conditional
/// operators, casts) into a [`Value`]. Anything else is rejected as an
/// unsupported node.
#[derive(Debug, Clone, Copy)]
pub struct ConstEvaluator<'a> {
    tree: &'a SyntaxTree,
    program: &'a Program,
}

impl<'a> ConstEvaluator<'a> {
    /// Creates an evaluator over `tree` that resolves names in `program`
    #[must_use]
    pub fn new(tree: &'a SyntaxTree, program: &'a Program) -> Self {
        Self { tree, program }
    }

    /// Evaluates `node` with names resolved from `context`
    ///
    /// # Errors
    ///
    /// Returns `ConstError` if:
    /// - a name is unknown, is not an enumerator or variable, has no value,
    ///   or its value depends on itself
    /// - a division or modulo by zero occurs
    /// - the tree contains a node outside the constant-expression grammar
    ///   or a literal that is not folded
    pub fn evaluate(&self, node: NodeId, context: &DeclContext) -> Result<Value, ConstError> {
        let mut in_progress = Vec::new();
        self.eval(node, context, &mut in_progress)
    }

    fn eval(
        &self,
        node: NodeId,
        context: &DeclContext,
        in_progress: &mut Vec<SymbolId>,
    ) -> Result<Value, ConstError> {
        let kind = self.tree.kind(node);
        match kind {
            NodeKind::ConstantExpression
            | NodeKind::ParenthesizedExpression
            | NodeKind::PlusOp => self.eval(self.child(node, 0)?, context, in_progress),

            NodeKind::Symbol | NodeKind::QualifiedId => {
                self.eval_symbol(node, context, in_progress)
            }

            NodeKind::CastExpression => {
                let operand = self.child(node, 1)?;
                let value = self.eval(operand, context, in_progress)?;
                log::debug!(
                    "cast {} evaluated as its operand: {value:?}",
                    self.tree.display(node)
                );
                Ok(value)
            }

            NodeKind::ConditionalExpression => {
                let condition = self.eval(self.child(node, 0)?, context, in_progress)?;
                let branch = if condition.is_zero() { 2 } else { 1 };
                self.eval(self.child(node, branch)?, context, in_progress)
            }

            NodeKind::DecimalLiteral
            | NodeKind::OctalLiteral
            | NodeKind::HexadecimalLiteral
            | NodeKind::CharacterLiteral
            | NodeKind::BooleanLiteral
            | NodeKind::FloatingLiteral => value_from_literal(self.tree, node),

            NodeKind::NotOp => Ok(self.eval(self.child(node, 0)?, context, in_progress)?.logical_not()),
            NodeKind::NegOp => Ok(self.eval(self.child(node, 0)?, context, in_progress)?.negate()),
            NodeKind::ComplementOp => {
                Ok(self.eval(self.child(node, 0)?, context, in_progress)?.complement())
            }

            _ => match BinaryOp::from_node_kind(kind) {
                Some(op) => self.eval_binary(op, node, context, in_progress),
                None => Err(ConstError::UnsupportedNode {
                    kind,
                    span: self.tree.span(node),
                }),
            },
        }
    }

    fn eval_binary(
        &self,
        op: BinaryOp,
        node: NodeId,
        context: &DeclContext,
        in_progress: &mut Vec<SymbolId>,
    ) -> Result<Value, ConstError> {
        let lhs = self.eval(self.child(node, 0)?, context, in_progress)?;
        // A skipped operand is replaced by the left one: `l && l` is false
        // for a zero `l`, `l || l` is true for a non-zero one.
        let rhs = if op.strictness().evaluates_rhs(lhs) {
            self.eval(self.child(node, 1)?, context, in_progress)?
        } else {
            log::trace!("short-circuited right operand of {op}");
            lhs
        };

        let span = self.tree.span(node);
        let (lhs, rhs) = promote(lhs, rhs);
        if lhs.kind() != rhs.kind() {
            return Err(ConstError::KindMismatch {
                lhs: lhs.kind(),
                rhs: rhs.kind(),
                span,
            });
        }
        op.apply(lhs, rhs, span)
    }

    fn eval_symbol(
        &self,
        node: NodeId,
        context: &DeclContext,
        in_progress: &mut Vec<SymbolId>,
    ) -> Result<Value, ConstError> {
        let span = self.tree.span(node);
        let name = || self.tree.display(node).to_string();

        let candidates = self.program.query_id_expression(self.tree, context, node)?;
        let Some(&id) = candidates.first() else {
            return Err(ConstError::UnknownSymbol { name: name(), span });
        };

        let entry = self.program.entry(id);
        if !entry.is_constant_candidate() {
            return Err(ConstError::NotAnExpression {
                name: name(),
                kind: entry.kind,
                span,
            });
        }
        let Some(expression) = entry.expression_value else {
            return Err(ConstError::NoValue { name: name(), span });
        };
        if in_progress.contains(&id) {
            return Err(ConstError::CyclicConstant { name: name(), span });
        }

        log::trace!("evaluating value of '{}'", name());
        in_progress.push(id);
        let value = self.eval(expression, &entry.decl_context, in_progress);
        in_progress.pop();
        value
    }

    fn child(&self, node: NodeId, index: usize) -> Result<NodeId, ConstError> {
        self.tree
            .child(node, index)
            .ok_or_else(|| ConstError::MalformedTree {
                kind: self.tree.kind(node),
                span: self.tree.span(node),
            })
    }
}

/// Evaluates a constant expression
///
/// # Errors
///
/// See [`ConstEvaluator::evaluate`].
pub fn evaluate_constant_expression(
    tree: &SyntaxTree,
    program: &Program,
    node: NodeId,
    context: &DeclContext,
) -> Result<Value, ConstError> {
    ConstEvaluator::new(tree, program).evaluate(node, context)
}
