//! Generic syntax tree for C++ translation units
//!
//! The parser hands the front end an already-built tree; this crate only
//! stores it. Nodes live in an arena and are addressed by [`NodeId`], which
//! makes "copy for instantiation" an explicit operation that allocates a
//! fresh subtree instead of aliasing the generic one.

mod kind;
mod print;

use cx_span::FileSpan;
use la_arena::{Arena, Idx};

pub use kind::NodeKind;
pub use print::NodeDisplay;

/// Identifier of a node inside a [`SyntaxTree`]
pub type NodeId = Idx<Node>;

/// One syntax tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The kind of this node
    pub kind: NodeKind,
    /// Lexeme for leaves (literals, identifiers, type names)
    pub text: Option<String>,
    /// Child nodes, laid out as documented on [`NodeKind`]
    pub children: Vec<NodeId>,
    /// Source location
    pub span: FileSpan,
    /// Node this one was copied from by [`SyntaxTree::copy_for_instantiation`]
    pub origin: Option<NodeId>,
}

/// Arena holding every node of a translation unit
#[derive(Debug, Default, Clone)]
pub struct SyntaxTree {
    nodes: Arena<Node>,
}

impl SyntaxTree {
    /// Creates an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been allocated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocates a leaf carrying `text`
    pub fn leaf(&mut self, kind: NodeKind, text: impl Into<String>) -> NodeId {
        self.leaf_at(kind, text, FileSpan::default())
    }

    /// Allocates a leaf carrying `text` at a source location
    pub fn leaf_at(&mut self, kind: NodeKind, text: impl Into<String>, span: FileSpan) -> NodeId {
        self.nodes.alloc(Node {
            kind,
            text: Some(text.into()),
            children: Vec::new(),
            span,
            origin: None,
        })
    }

    /// Allocates an interior node
    pub fn node(&mut self, kind: NodeKind, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.node_at(kind, children, FileSpan::default())
    }

    /// Allocates an interior node at a source location
    pub fn node_at(
        &mut self,
        kind: NodeKind,
        children: impl IntoIterator<Item = NodeId>,
        span: FileSpan,
    ) -> NodeId {
        self.nodes.alloc(Node {
            kind,
            text: None,
            children: children.into_iter().collect(),
            span,
            origin: None,
        })
    }

    /// Allocates an unqualified identifier
    pub fn identifier(&mut self, name: impl Into<String>) -> NodeId {
        self.leaf(NodeKind::Symbol, name)
    }

    /// Allocates an integer literal, choosing decimal, octal or hexadecimal
    /// kind from the lexeme's prefix
    pub fn integer_literal(&mut self, lexeme: &str) -> NodeId {
        let kind = if lexeme.starts_with("0x") || lexeme.starts_with("0X") {
            NodeKind::HexadecimalLiteral
        } else if lexeme.len() > 1 && lexeme.starts_with('0') {
            NodeKind::OctalLiteral
        } else {
            NodeKind::DecimalLiteral
        };
        self.leaf(kind, lexeme)
    }

    /// Allocates a binary operator node
    pub fn binary(&mut self, kind: NodeKind, lhs: NodeId, rhs: NodeId) -> NodeId {
        debug_assert!(kind.is_binary_operator(), "{kind} is not a binary operator");
        self.node(kind, [lhs, rhs])
    }

    /// Allocates a unary operator node
    pub fn unary(&mut self, kind: NodeKind, operand: NodeId) -> NodeId {
        debug_assert!(kind.is_unary_operator(), "{kind} is not a unary operator");
        self.node(kind, [operand])
    }

    /// Returns a node
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Kind of a node
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id].kind
    }

    /// Lexeme of a leaf
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes[id].text.as_deref()
    }

    /// Source location of a node
    #[must_use]
    pub fn span(&self, id: NodeId) -> FileSpan {
        self.nodes[id].span
    }

    /// The `index`-th child of a node
    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes[id].children.get(index).copied()
    }

    /// All children of a node
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Deep-copies the subtree rooted at `id`
    ///
    /// The copy shares no node with the source, so several instantiations
    /// of one generic definition can be analysed (and annotated) side by
    /// side. Each copied node records its source in [`Node::origin`].
    pub fn copy_for_instantiation(&mut self, id: NodeId) -> NodeId {
        let source = self.nodes[id].clone();
        let children = source
            .children
            .iter()
            .map(|&child| self.copy_for_instantiation(child))
            .collect();
        self.nodes.alloc(Node {
            kind: source.kind,
            text: source.text,
            children,
            span: source.span,
            origin: Some(id),
        })
    }

    /// Renders the subtree rooted at `id` as C++ source, for diagnostics
    #[must_use]
    pub fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        NodeDisplay::new(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_literal_kind_from_prefix() {
        let mut tree = SyntaxTree::new();
        let decimal = tree.integer_literal("10UL");
        let octal = tree.integer_literal("010");
        let hex = tree.integer_literal("0x10");
        let zero = tree.integer_literal("0");
        assert_eq!(tree.kind(decimal), NodeKind::DecimalLiteral);
        assert_eq!(tree.kind(octal), NodeKind::OctalLiteral);
        assert_eq!(tree.kind(hex), NodeKind::HexadecimalLiteral);
        assert_eq!(tree.kind(zero), NodeKind::DecimalLiteral);
    }

    #[test]
    fn test_copy_for_instantiation_is_independent() {
        let mut tree = SyntaxTree::new();
        let lhs = tree.identifier("N");
        let rhs = tree.integer_literal("1");
        let sum = tree.binary(NodeKind::AddOp, lhs, rhs);

        let copy = tree.copy_for_instantiation(sum);

        assert_ne!(copy, sum);
        assert_eq!(tree.get(copy).origin, Some(sum));
        assert_eq!(tree.kind(copy), NodeKind::AddOp);
        let copied_lhs = tree.child(copy, 0);
        assert!(copied_lhs.is_some_and(|child| child != lhs));
        assert_eq!(copied_lhs.and_then(|child| tree.text(child)), Some("N"));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_child_out_of_range() {
        let mut tree = SyntaxTree::new();
        let leaf = tree.identifier("x");
        assert_eq!(tree.child(leaf, 0), None);
        assert!(tree.children(leaf).is_empty());
    }
}
