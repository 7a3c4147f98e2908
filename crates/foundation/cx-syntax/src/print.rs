//! C++ rendering of syntax trees for diagnostics

use crate::{NodeId, NodeKind, SyntaxTree};
use std::fmt;

/// Displays a subtree as C++ source
///
/// Output is only meant for humans: spacing is normalised and no attempt
/// is made to reproduce the source layout.
pub struct NodeDisplay<'tree> {
    tree: &'tree SyntaxTree,
    root: NodeId,
}

impl<'tree> NodeDisplay<'tree> {
    pub(crate) fn new(tree: &'tree SyntaxTree, root: NodeId) -> Self {
        Self { tree, root }
    }

    fn write_node(&self, formatter: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let tree = self.tree;
        let kind = tree.kind(id);
        let children = tree.children(id);

        if kind.is_binary_operator() {
            if let (Some(&lhs), Some(&rhs), Some(op)) =
                (children.first(), children.get(1), kind.operator_text())
            {
                self.write_node(formatter, lhs)?;
                write!(formatter, " {op} ")?;
                return self.write_node(formatter, rhs);
            }
        }

        if kind.is_unary_operator() {
            if let (Some(&operand), Some(op)) = (children.first(), kind.operator_text()) {
                formatter.write_str(op)?;
                return self.write_node(formatter, operand);
            }
        }

        match kind {
            NodeKind::ConstantExpression => self.write_list(formatter, children, ""),
            NodeKind::ParenthesizedExpression => {
                formatter.write_str("(")?;
                self.write_list(formatter, children, "")?;
                formatter.write_str(")")
            }
            NodeKind::GlobalScope => Ok(()),
            NodeKind::QualifiedId => {
                let mut first = true;
                for &child in children {
                    if tree.kind(child) == NodeKind::GlobalScope {
                        formatter.write_str("::")?;
                        continue;
                    }
                    if !first {
                        formatter.write_str("::")?;
                    }
                    first = false;
                    self.write_node(formatter, child)?;
                }
                Ok(())
            }
            NodeKind::TemplateId => self.write_applied(formatter, children, "<", ">"),
            NodeKind::FunctionCall => self.write_applied(formatter, children, "(", ")"),
            NodeKind::CastExpression => {
                formatter.write_str("(")?;
                if let Some(&target) = children.first() {
                    self.write_node(formatter, target)?;
                }
                formatter.write_str(")")?;
                self.write_list(formatter, children.get(1..).unwrap_or_default(), "")
            }
            NodeKind::ConditionalExpression => match children {
                [condition, if_true, if_false] => {
                    self.write_node(formatter, *condition)?;
                    formatter.write_str(" ? ")?;
                    self.write_node(formatter, *if_true)?;
                    formatter.write_str(" : ")?;
                    self.write_node(formatter, *if_false)
                }
                _ => self.write_fallback(formatter, id),
            },
            NodeKind::MemberSpecification => self.write_list(formatter, children, " "),
            NodeKind::MemberDeclaration => {
                self.write_list(formatter, children, " ")?;
                formatter.write_str(";")
            }
            NodeKind::BaseClause => {
                formatter.write_str(": ")?;
                self.write_list(formatter, children, ", ")
            }
            NodeKind::FunctionDefinition => self.write_list(formatter, children, " "),
            NodeKind::CompoundStatement => {
                if children.is_empty() {
                    return formatter.write_str("{ }");
                }
                formatter.write_str("{ ")?;
                self.write_list(formatter, children, " ")?;
                formatter.write_str(" }")
            }
            NodeKind::ReturnStatement => {
                formatter.write_str("return")?;
                if !children.is_empty() {
                    formatter.write_str(" ")?;
                    self.write_list(formatter, children, "")?;
                }
                formatter.write_str(";")
            }
            NodeKind::ExpressionStatement => {
                self.write_list(formatter, children, "")?;
                formatter.write_str(";")
            }
            _ => self.write_fallback(formatter, id),
        }
    }

    fn write_list(
        &self,
        formatter: &mut fmt::Formatter<'_>,
        nodes: &[NodeId],
        separator: &str,
    ) -> fmt::Result {
        for (index, &node) in nodes.iter().enumerate() {
            if index > 0 {
                formatter.write_str(separator)?;
            }
            self.write_node(formatter, node)?;
        }
        Ok(())
    }

    /// `head open args close`, used for calls and template ids
    fn write_applied(
        &self,
        formatter: &mut fmt::Formatter<'_>,
        children: &[NodeId],
        open: &str,
        close: &str,
    ) -> fmt::Result {
        let Some((&head, arguments)) = children.split_first() else {
            return Ok(());
        };
        self.write_node(formatter, head)?;
        formatter.write_str(open)?;
        self.write_list(formatter, arguments, ", ")?;
        formatter.write_str(close)
    }

    fn write_fallback(&self, formatter: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        if let Some(text) = self.tree.text(id) {
            return formatter.write_str(text);
        }
        write!(formatter, "<{}", self.tree.kind(id))?;
        for &child in self.tree.children(id) {
            formatter.write_str(" ")?;
            self.write_node(formatter, child)?;
        }
        formatter.write_str(">")
    }
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(formatter, self.root)
    }
}
