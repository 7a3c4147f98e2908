//! Id-expression lookup

use crate::{DeclContext, LookupError, Program, ScopeId, SymbolId, SymbolKind};
use cx_syntax::{NodeId, NodeKind, SyntaxTree};

impl Program {
    /// Resolves an id-expression to its candidate entries
    ///
    /// Unqualified names walk the scope chain from `context.current_scope`.
    /// Qualified names resolve their first component the same way (or start
    /// at the global scope after a leading `::`) and every later component
    /// only in the scope opened by the previous one. An unknown name yields
    /// an empty list.
    pub fn query_id_expression(
        &self,
        tree: &SyntaxTree,
        context: &DeclContext,
        node: NodeId,
    ) -> Result<Vec<SymbolId>, LookupError> {
        match tree.kind(node) {
            NodeKind::Symbol => {
                let name = component_text(tree, node)?;
                Ok(self.lookup_in_chain(context.current_scope, name))
            }
            NodeKind::QualifiedId => self.query_qualified_id(tree, context, node),
            kind => Err(LookupError::NotAName { kind }),
        }
    }

    fn query_qualified_id(
        &self,
        tree: &SyntaxTree,
        context: &DeclContext,
        node: NodeId,
    ) -> Result<Vec<SymbolId>, LookupError> {
        let mut components = tree.children(node);
        let mut qualifier = None;
        if let Some(&first) = components.first()
            && tree.kind(first) == NodeKind::GlobalScope
        {
            qualifier = Some(context.global_scope);
            components = &components[1..];
        }

        let Some((&last, path)) = components.split_last() else {
            return Err(LookupError::NotAName {
                kind: NodeKind::QualifiedId,
            });
        };

        for &component in path {
            let name = component_text(tree, component)?;
            let candidates = match qualifier {
                Some(scope) => self.lookup_in_scope(scope, name),
                None => self.lookup_in_chain(context.current_scope, name),
            };
            let Some(&found) = candidates.first() else {
                return Ok(Vec::new());
            };
            qualifier = Some(self.scope_opened_by(found).ok_or_else(|| {
                LookupError::NotAScope {
                    name: name.to_owned(),
                }
            })?);
        }

        let name = component_text(tree, last)?;
        Ok(match qualifier {
            Some(scope) => self.lookup_in_scope(scope, name),
            None => self.lookup_in_chain(context.current_scope, name),
        })
    }

    fn lookup_in_chain(&self, scope: ScopeId, name: &str) -> Vec<SymbolId> {
        self.interner
            .get(name)
            .map(|name| self.scopes.lookup(scope, name).to_vec())
            .unwrap_or_default()
    }

    fn lookup_in_scope(&self, scope: ScopeId, name: &str) -> Vec<SymbolId> {
        self.interner
            .get(name)
            .map(|name| self.scopes.lookup_local(scope, name).to_vec())
            .unwrap_or_default()
    }

    /// Member scope of a namespace or (possibly typedef'd) class
    fn scope_opened_by(&self, entry: SymbolId) -> Option<ScopeId> {
        let entry = &self.symbols[entry];
        match entry.kind {
            SymbolKind::Namespace => entry.related_scope,
            SymbolKind::Class | SymbolKind::Typedef => {
                let class = self.class_type(entry.ty?)?;
                class.inner_context.map(|inner| inner.current_scope)
            }
            _ => None,
        }
    }
}

fn component_text(tree: &SyntaxTree, node: NodeId) -> Result<&str, LookupError> {
    match tree.kind(node) {
        NodeKind::Symbol => tree.text(node).ok_or(LookupError::MissingText),
        kind => Err(LookupError::NotAName { kind }),
    }
}

#[cfg(test)]
mod tests {
    use crate::{BuiltinType, ClassType, Program, SymbolKind, Type};
    use crate::LookupError;
    use cx_syntax::{NodeKind, SyntaxTree};

    #[test]
    fn test_unqualified_lookup_prefers_inner_scope() {
        let mut program = Program::default();
        let global = program.global_context();
        let int = program.types.builtin(BuiltinType::Int);
        let outer = program.declare_variable(&global, "N", int, None);
        let (_, inner_context) = program.declare_namespace(&global, "ns");
        let inner = program.declare_variable(&inner_context, "N", int, None);

        let mut tree = SyntaxTree::new();
        let name = tree.identifier("N");

        assert_eq!(program.query_id_expression(&tree, &inner_context, name), Ok(vec![inner]));
        assert_eq!(program.query_id_expression(&tree, &global, name), Ok(vec![outer]));
    }

    #[test]
    fn test_qualified_lookup_through_namespace_and_class() {
        let mut program = Program::default();
        let global = program.global_context();
        let int = program.types.builtin(BuiltinType::Int);
        let (_, ns_context) = program.declare_namespace(&global, "ns");

        let class = program.new_symbol(&ns_context, ns_context.current_scope, "A", SymbolKind::Class);
        let class_context = program.scopes.new_class_context(&ns_context, class);
        let mut class_type = ClassType::incomplete(None);
        class_type.inner_context = Some(class_context);
        let class_ty = program.types.alloc(Type::Class(class_type));
        program.entry_mut(class).ty = Some(class_ty);
        let member = program.declare_variable(&class_context, "K", int, None);

        let mut tree = SyntaxTree::new();
        let root = tree.leaf(NodeKind::GlobalScope, "::");
        let ns = tree.identifier("ns");
        let a = tree.identifier("A");
        let k = tree.identifier("K");
        let qualified = tree.node(NodeKind::QualifiedId, [root, ns, a, k]);

        assert_eq!(program.query_id_expression(&tree, &global, qualified), Ok(vec![member]));
    }

    #[test]
    fn test_qualified_lookup_does_not_walk_parents() {
        let mut program = Program::default();
        let global = program.global_context();
        let int = program.types.builtin(BuiltinType::Int);
        program.declare_variable(&global, "N", int, None);
        program.declare_namespace(&global, "ns");

        let mut tree = SyntaxTree::new();
        let ns = tree.identifier("ns");
        let n = tree.identifier("N");
        let qualified = tree.node(NodeKind::QualifiedId, [ns, n]);

        assert_eq!(program.query_id_expression(&tree, &global, qualified), Ok(vec![]));
    }

    #[test]
    fn test_variable_is_not_a_scope() {
        let mut program = Program::default();
        let global = program.global_context();
        let int = program.types.builtin(BuiltinType::Int);
        program.declare_variable(&global, "v", int, None);

        let mut tree = SyntaxTree::new();
        let v = tree.identifier("v");
        let x = tree.identifier("x");
        let qualified = tree.node(NodeKind::QualifiedId, [v, x]);

        let error = program.query_id_expression(&tree, &global, qualified);
        assert_eq!(error, Err(LookupError::NotAScope { name: "v".to_owned() }));
    }

    #[test]
    fn test_literal_is_not_a_name() {
        let program = Program::default();
        let mut tree = SyntaxTree::new();
        let literal = tree.integer_literal("1");

        let error = program.query_id_expression(&tree, &program.global_context(), literal);
        assert_eq!(error, Err(LookupError::NotAName { kind: NodeKind::DecimalLiteral }));
    }
}
